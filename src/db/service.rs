use crate::config::DatabaseConfig;
use crate::db::connection;
use crate::db::models::{ChatMessage, ClientSummary, SessionSummary};
use postgres::Row;
use serde_json::Value;
use tracing::{debug, error};

/// The table written by the external ingestion pipeline. Read-only here.
const MESSAGES_TABLE: &str = "n8n_conversas";

pub struct DbService;

impl DbService {
    /// Connectivity probe used by the health endpoint and the `check` command.
    pub fn ping(config: &DatabaseConfig) -> bool {
        match connection::connect(config) {
            Some(mut client) => match client.simple_query("SELECT 1") {
                Ok(_) => true,
                Err(e) => {
                    error!("health probe query failed: {}", e);
                    false
                }
            },
            None => false,
        }
    }

    /// All messages of one conversation, oldest first, normalized for display.
    pub fn conversation_messages(config: &DatabaseConfig, session_id: &str) -> Vec<ChatMessage> {
        let query = format!(
            "SELECT id::BIGINT, session_id, message \
             FROM {MESSAGES_TABLE} \
             WHERE session_id = $1 \
             ORDER BY id ASC"
        );

        let rows = Self::run(config, &query, &[&session_id]);
        debug!("conversation {} returned {} rows", session_id, rows.len());
        rows.iter().map(Self::row_to_chat_message).collect()
    }

    /// Groups conversations by the client prefix (everything before the first
    /// `:`). Session ids without a separator are not client-scoped and are
    /// left out entirely.
    pub fn client_rollup(config: &DatabaseConfig) -> Vec<ClientSummary> {
        let query = format!(
            "SELECT split_part(session_id, ':', 1) AS client, \
                    COUNT(DISTINCT session_id)::BIGINT AS number_count, \
                    COUNT(*)::BIGINT AS message_count, \
                    MAX(id)::BIGINT AS last_id \
             FROM {MESSAGES_TABLE} \
             WHERE session_id IS NOT NULL \
               AND session_id != '' \
               AND strpos(session_id, ':') > 0 \
             GROUP BY 1 \
             ORDER BY last_id DESC"
        );

        Self::run(config, &query, &[])
            .iter()
            .map(|row| ClientSummary {
                client: row.get(0),
                number_count: row.get(1),
                message_count: row.get(2),
                last_id: row.get(3),
            })
            .collect()
    }

    /// All session ids belonging to one client, most recent first.
    pub fn client_sessions(config: &DatabaseConfig, client: &str) -> Vec<SessionSummary> {
        let query = format!(
            "SELECT session_id, \
                    COUNT(*)::BIGINT AS message_count, \
                    MAX(id)::BIGINT AS last_id \
             FROM {MESSAGES_TABLE} \
             WHERE strpos(session_id, ':') > 0 \
               AND split_part(session_id, ':', 1) = $1 \
             GROUP BY session_id \
             ORDER BY last_id DESC"
        );

        Self::run(config, &query, &[&client])
            .iter()
            .map(Self::row_to_session_summary)
            .collect()
    }

    /// Case-insensitive substring search over the full session id, the client
    /// prefix, and the number suffix. Capped at 50 matches, most recent first.
    pub fn search_sessions(config: &DatabaseConfig, term: &str) -> Vec<SessionSummary> {
        let query = format!(
            "SELECT session_id, \
                    COUNT(*)::BIGINT AS message_count, \
                    MAX(id)::BIGINT AS last_id \
             FROM {MESSAGES_TABLE} \
             WHERE session_id IS NOT NULL \
               AND session_id != '' \
               AND (session_id ILIKE $1 \
                    OR split_part(session_id, ':', 1) ILIKE $1 \
                    OR split_part(session_id, ':', 2) ILIKE $1) \
             GROUP BY session_id \
             ORDER BY last_id DESC \
             LIMIT 50"
        );

        let pattern = format!("%{}%", term);
        Self::run(config, &query, &[&pattern])
            .iter()
            .map(Self::row_to_session_summary)
            .collect()
    }

    /// Opens a connection, runs one statement, and lets the connection drop.
    /// Both connection and query failures degrade to an empty row set; the
    /// web layer treats "no data" and "error" identically.
    fn run(
        config: &DatabaseConfig,
        query: &str,
        params: &[&(dyn postgres::types::ToSql + Sync)],
    ) -> Vec<Row> {
        let Some(mut client) = connection::connect(config) else {
            return Vec::new();
        };

        match client.query(query, params) {
            Ok(rows) => rows,
            Err(e) => {
                error!("query failed: {}", e);
                Vec::new()
            }
        }
    }

    fn row_to_chat_message(row: &Row) -> ChatMessage {
        let id: i64 = row.get(0);
        let session_id: String = row.get(1);

        // The message column is JSONB on newer deployments and TEXT holding a
        // JSON document on older ones; try the native value first.
        let payload = row
            .try_get::<_, Value>(2)
            .ok()
            .or_else(|| {
                row.try_get::<_, String>(2)
                    .ok()
                    .and_then(|raw| serde_json::from_str(&raw).ok())
            });

        ChatMessage::from_payload(id, session_id, payload)
    }

    fn row_to_session_summary(row: &Row) -> SessionSummary {
        SessionSummary {
            session_id: row.get(0),
            message_count: row.get(1),
            last_id: row.get(2),
        }
    }
}
