#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::error::*;
    use crate::event::*;
    use crate::message::*;

    // ─── Turn Tests ──────────────────────────────────────────

    #[test]
    fn test_turn_user() {
        let turn = Turn::user("hello");
        assert_eq!(turn.author, Author::User);
        assert_eq!(turn.text, "hello");
        assert!(turn.is_user());
        assert!(!turn.created_at.is_empty());
    }

    #[test]
    fn test_turn_assistant() {
        let turn = Turn::assistant("Xin chào!");
        assert_eq!(turn.author, Author::Assistant);
        assert_eq!(turn.text, "Xin chào!");
        assert!(!turn.is_user());
    }

    #[test]
    fn test_turn_timestamp_is_rfc3339() {
        let turn = Turn::user("x");
        assert!(chrono::DateTime::parse_from_rfc3339(&turn.created_at).is_ok());
    }

    #[test]
    fn test_author_serialization() {
        assert_eq!(serde_json::to_string(&Author::User).unwrap(), r#""user""#);
        assert_eq!(serde_json::to_string(&Author::Assistant).unwrap(), r#""assistant""#);
    }

    #[test]
    fn test_author_labels() {
        assert_eq!(Author::User.label(), "You");
        assert_eq!(Author::Assistant.label(), "Assistant");
    }

    // ─── Wire Message Tests ──────────────────────────────────

    #[test]
    fn test_wire_message_shape() {
        let json = serde_json::to_value(WireMessage::system("be nice")).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "be nice");

        let json = serde_json::to_value(WireMessage::user("hello")).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hello");
    }

    #[test]
    fn test_role_from_author() {
        assert_eq!(Role::from(Author::User), Role::User);
        assert_eq!(Role::from(Author::Assistant), Role::Assistant);
    }

    #[test]
    fn test_role_deserialization() {
        let role: Role = serde_json::from_str(r#""assistant""#).unwrap();
        assert_eq!(role, Role::Assistant);
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_default_config_is_valid() {
        let config = ChatConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_model, "vinallama/vinallama-7b");
        assert_eq!(config.models.len(), 4);
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.backend.request_timeout_ms, Some(60_000));
    }

    #[test]
    fn test_default_generation_options() {
        let options = GenerationOptions::default();
        assert!((options.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(options.context_window, 2048);
    }

    #[test]
    fn test_generation_options_wire_key() {
        let json = serde_json::to_value(GenerationOptions::default()).unwrap();
        assert_eq!(json["num_ctx"], 2048);
        assert!(json.get("context_window").is_none());
    }

    #[test]
    fn test_generation_options_accepts_alias() {
        let options: GenerationOptions =
            serde_json::from_str(r#"{"temperature":0.2,"context_window":4096}"#).unwrap();
        assert_eq!(options.context_window, 4096);
    }

    #[test]
    fn test_allow_list_lookup() {
        let config = ChatConfig::default();
        assert!(config.is_allowed("gemma:2b"));
        assert!(!config.is_allowed("gpt-4"));
        assert_eq!(config.model_label("mistral"), "Mistral 7B");
        assert_eq!(config.model_label("unknown"), "unknown");
    }

    #[test]
    fn test_config_from_json_partial_override() {
        let config = ChatConfig::from_json(
            r#"{"backend":{"base_url":"http://10.0.0.2:8000"},"default_model":"gemma:2b"}"#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "http://10.0.0.2:8000");
        assert_eq!(config.backend.request_timeout_ms, Some(60_000));
        assert_eq!(config.default_model, "gemma:2b");
        assert_eq!(config.models.len(), 4);
    }

    #[test]
    fn test_config_from_json_disables_timeout() {
        let config =
            ChatConfig::from_json(r#"{"backend":{"request_timeout_ms":null}}"#).unwrap();
        assert_eq!(config.backend.request_timeout_ms, None);
    }

    #[test]
    fn test_config_from_json_invalid() {
        let err = ChatConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ChatError::Serialization(_)));
    }

    #[test]
    fn test_config_rejects_default_outside_allow_list() {
        let config = ChatConfig {
            default_model: "llama3".to_string(),
            ..ChatConfig::default()
        };
        assert!(matches!(config.validate(), Err(ChatError::Config(_))));
    }

    #[test]
    fn test_config_rejects_empty_allow_list() {
        let config = ChatConfig {
            models: Vec::new(),
            ..ChatConfig::default()
        };
        assert!(matches!(config.validate(), Err(ChatError::Config(_))));
    }

    #[test]
    fn test_config_rejects_duplicate_models() {
        let mut config = ChatConfig::default();
        config.models.push(ModelOption::new("mistral", "Mistral again"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_config_rejects_bad_temperature() {
        let mut config = ChatConfig::default();
        config.options.temperature = f32::NAN;
        assert!(config.validate().is_err());
        config.options.temperature = 3.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_zero_context_window() {
        let mut config = ChatConfig::default();
        config.options.context_window = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_blank_base_url() {
        let mut config = ChatConfig::default();
        config.backend.base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_error_display() {
        assert_eq!(
            ChatError::Network("refused".to_string()).to_string(),
            "Network error: refused"
        );
        assert_eq!(
            ChatError::Http { status: 500, body: "boom".to_string() }.to_string(),
            "HTTP 500: boom"
        );
        assert_eq!(ChatError::Timeout(1500).to_string(), "Timeout after 1500ms");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(ChatError::Network(String::new()).kind(), FailureKind::Transport);
        assert_eq!(ChatError::Timeout(1).kind(), FailureKind::Transport);
        assert_eq!(
            ChatError::Http { status: 502, body: String::new() }.kind(),
            FailureKind::Transport
        );
        assert_eq!(
            ChatError::MalformedResponse(String::new()).kind(),
            FailureKind::MalformedResponse
        );
        assert_eq!(
            ChatError::UnknownModel("x".to_string()).kind(),
            FailureKind::InvalidRequest
        );
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ChatError = serde_err.into();
        assert!(matches!(err, ChatError::Serialization(_)));
    }

    // ─── Event Tests ─────────────────────────────────────────

    #[test]
    fn test_session_event_serialization() {
        let event = SessionEvent::RequestStarted {
            request_id: 3,
            model: "gemma:2b".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("RequestStarted"));
        assert!(json.contains("gemma:2b"));
    }

    #[test]
    fn test_session_event_turn_appended() {
        let event = SessionEvent::TurnAppended {
            index: 0,
            author: Author::User,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: SessionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
