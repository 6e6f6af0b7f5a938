#[cfg(test)]
mod tests {
    use convoview::db::models::{ChatMessage, DECODE_ERROR_SENTINEL};
    use serde_json::json;

    #[test]
    fn keeps_sender_and_content_from_valid_payloads() {
        let msg = ChatMessage::from_payload(
            1,
            "acme:555".to_string(),
            Some(json!({"type": "human", "content": "hi"})),
        );

        assert_eq!(msg.id, 1);
        assert_eq!(msg.session_id, "acme:555");
        assert_eq!(msg.sender, "human");
        assert_eq!(msg.content, "hi");
    }

    #[test]
    fn missing_type_defaults_to_unknown() {
        let msg = ChatMessage::from_payload(
            2,
            "acme:555".to_string(),
            Some(json!({"content": "hi"})),
        );

        assert_eq!(msg.sender, "unknown");
        assert_eq!(msg.content, "hi");
    }

    #[test]
    fn missing_content_defaults_to_empty() {
        let msg = ChatMessage::from_payload(3, "acme:555".to_string(), Some(json!({"type": "ai"})));

        assert_eq!(msg.sender, "ai");
        assert_eq!(msg.content, "");
    }

    #[test]
    fn decodes_json_carried_in_a_string_payload() {
        let msg = ChatMessage::from_payload(
            4,
            "acme:555".to_string(),
            Some(json!(r#"{"type":"ai","content":"hello"}"#)),
        );

        assert_eq!(msg.sender, "ai");
        assert_eq!(msg.content, "hello");
    }

    #[test]
    fn non_object_payloads_yield_the_sentinel() {
        let payloads = [
            None,
            Some(json!(42)),
            Some(json!(["human", "hi"])),
            Some(json!("definitely not json")),
        ];

        for payload in payloads {
            let msg = ChatMessage::from_payload(7, "acme:555".to_string(), payload);

            assert_eq!(msg.id, 7);
            assert_eq!(msg.session_id, "acme:555");
            assert_eq!(msg.sender, "system");
            assert_eq!(msg.content, DECODE_ERROR_SENTINEL);
        }
    }
}
