#[cfg(test)]
mod tests {
    use convoview::config::DatabaseConfig;
    use convoview::db::service::DbService;

    // Nothing listens on this port; every call must degrade to "no data"
    // instead of surfacing an error.
    fn unreachable() -> DatabaseConfig {
        DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 59999,
            name: "conversas".to_string(),
            user: "viewer".to_string(),
            password: "viewer".to_string(),
        }
    }

    #[test]
    fn ping_reports_an_unreachable_database() {
        assert!(!DbService::ping(&unreachable()));
    }

    #[test]
    fn conversation_fetch_degrades_to_empty() {
        let messages = DbService::conversation_messages(&unreachable(), "acme:555");
        assert!(messages.is_empty());
    }

    #[test]
    fn client_rollup_degrades_to_empty() {
        let clients = DbService::client_rollup(&unreachable());
        assert!(clients.is_empty());
    }

    #[test]
    fn client_sessions_degrade_to_empty() {
        let sessions = DbService::client_sessions(&unreachable(), "acme");
        assert!(sessions.is_empty());
    }

    #[test]
    fn search_degrades_to_empty() {
        let results = DbService::search_sessions(&unreachable(), "acme");
        assert!(results.is_empty());
    }
}
