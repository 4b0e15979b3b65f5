//! Chat transcript state.
//!
//! [`ChatSession`] owns the transcript and the selector values for the chat
//! page. It never talks to the network itself: [`ChatSession::begin_send`]
//! hands back the request to issue and [`ChatSession::complete`] applies the
//! outcome.

use crate::forecast::{BloodType, FORECAST_HORIZONS, is_valid_horizon};
use crate::request::{RequestToken, RequestTracker};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;

/// Shown in place of an answer when the chat call fails.
pub const CHAT_FAILURE_MESSAGE: &str =
    "죄송합니다. 답변을 생성하는 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[schema(example = "이번 달 부족 원인이 뭔가요?")]
    pub message: String,
    pub region: String,
    pub blood_type: BloodType,
    #[schema(example = 1)]
    pub month: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
}

/// Query parameters of the chat page.
///
/// Blood type stays a string so one bad parameter does not discard the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u8>,
}

impl ChatQuery {
    pub fn for_segment(region: &str, blood_type: BloodType, month: u8) -> Self {
        Self {
            region: Some(region.to_string()),
            blood_type: Some(blood_type.to_string()),
            month: Some(month),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_none() && self.blood_type.is_none() && self.month.is_none()
    }
}

/// Question placed in the input box when arriving from the dashboard.
pub fn prefill_question(region: &str, blood_type: BloodType, month: u8) -> String {
    format!(
        "{} 지역 {}형 혈액의 {}개월 후 수급 예측을 설명해주세요. 부족이 예상된다면 원인과 대응 방안도 알려주세요.",
        region, blood_type, month
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ChatValidationError {
    #[error("지역을 선택해주세요")]
    MissingRegion,
    #[error("혈액형을 선택해주세요")]
    MissingBloodType,
    #[error("메시지를 입력해주세요")]
    EmptyMessage,
    #[error("이전 질문에 대한 답변을 기다리는 중입니다")]
    Busy,
}

/// A request the caller must send, tagged with its token.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChat {
    pub token: RequestToken,
    pub request: ChatRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    pub input: String,
    pub region: Option<String>,
    pub blood_type: Option<BloodType>,
    pub month: u8,
    request: RequestTracker,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            input: String::new(),
            region: None,
            blood_type: None,
            month: FORECAST_HORIZONS[0],
            request: RequestTracker::new(),
        }
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Presets the selectors from navigation parameters and pre-fills the
    /// input when region and blood type are both known.
    pub fn from_query(query: &ChatQuery) -> Self {
        let mut session = Self::new();

        session.region = query
            .region
            .as_deref()
            .map(str::trim)
            .filter(|region| !region.is_empty())
            .map(str::to_string);

        session.blood_type = match query.blood_type.as_deref() {
            Some(raw) => match raw.parse() {
                Ok(blood_type) => Some(blood_type),
                Err(e) => {
                    warn!("Ignoring chat query parameter: {}", e);
                    None
                }
            },
            None => None,
        };

        if let Some(month) = query.month.filter(|m| is_valid_horizon(*m)) {
            session.month = month;
        }

        if let (Some(region), Some(blood_type)) = (&session.region, session.blood_type) {
            session.input = prefill_question(region, blood_type, session.month);
        }

        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_busy(&self) -> bool {
        self.request.is_pending()
    }

    pub fn can_send(&self) -> bool {
        !self.is_busy()
            && self.region.is_some()
            && self.blood_type.is_some()
            && !self.input.trim().is_empty()
    }

    /// Checks whether a message could be sent right now.
    pub fn validate(&self) -> Result<(), ChatValidationError> {
        if self.is_busy() {
            return Err(ChatValidationError::Busy);
        }
        if self.region.is_none() {
            return Err(ChatValidationError::MissingRegion);
        }
        if self.blood_type.is_none() {
            return Err(ChatValidationError::MissingBloodType);
        }
        if self.input.trim().is_empty() {
            return Err(ChatValidationError::EmptyMessage);
        }
        Ok(())
    }

    /// Validates the selection and input, appends the user message and
    /// returns the request to send. Nothing changes on error.
    pub fn begin_send(&mut self) -> Result<PendingChat, ChatValidationError> {
        self.validate()?;
        let region = self.region.clone().ok_or(ChatValidationError::MissingRegion)?;
        let blood_type = self.blood_type.ok_or(ChatValidationError::MissingBloodType)?;
        let message = self.input.trim().to_string();

        self.messages.push(ChatMessage::user(message.clone()));
        self.input.clear();
        let token = self.request.issue();
        debug!(token = token.value(), %region, %blood_type, month = self.month, "chat request issued");

        Ok(PendingChat {
            token,
            request: ChatRequest {
                message,
                region,
                blood_type,
                month: self.month,
            },
        })
    }

    /// Appends the assistant reply for `token`. Returns false when the
    /// response is stale and was dropped.
    pub fn complete(&mut self, token: RequestToken, outcome: Result<String, String>) -> bool {
        if !self.request.settle(token) {
            debug!(token = token.value(), "discarding stale chat response");
            return false;
        }

        let content = match outcome {
            Ok(response) => response,
            Err(e) => {
                warn!("Chat request failed: {}", e);
                CHAT_FAILURE_MESSAGE.to_string()
            }
        };
        self.messages.push(ChatMessage::assistant(content));
        true
    }

    /// Starts over from `query` as if the page had just been opened with it.
    /// Tokens keep counting from the old session so its late replies stay stale.
    pub fn restart(&mut self, query: &ChatQuery) {
        let mut request = std::mem::take(&mut self.request);
        request.invalidate();
        *self = Self {
            request,
            ..Self::from_query(query)
        };
    }

    /// Empties the transcript and drops any outstanding request.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.request.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_session() -> ChatSession {
        let mut session = ChatSession::new();
        session.region = Some("서울중앙".to_string());
        session.blood_type = Some(BloodType::A);
        session.month = 2;
        session.input = "왜 부족한가요?".to_string();
        session
    }

    #[test]
    fn test_send_without_selection_is_rejected() {
        let mut session = ChatSession::new();
        session.input = "hello".to_string();

        assert_eq!(session.begin_send(), Err(ChatValidationError::MissingRegion));

        session.region = Some("부산".to_string());
        assert_eq!(session.begin_send(), Err(ChatValidationError::MissingBloodType));
        assert!(session.messages().is_empty());
        assert!(!session.is_busy());
        assert_eq!(session.input, "hello");
    }

    #[test]
    fn test_empty_message_is_rejected() {
        let mut session = ready_session();
        session.input = "   ".to_string();

        assert_eq!(session.begin_send(), Err(ChatValidationError::EmptyMessage));
    }

    #[test]
    fn test_send_appends_user_message_and_includes_month() {
        let mut session = ready_session();

        let pending = session.begin_send().unwrap();

        assert_eq!(pending.request.month, 2);
        assert_eq!(pending.request.region, "서울중앙");
        assert_eq!(pending.request.blood_type, BloodType::A);
        assert_eq!(session.messages(), &[ChatMessage::user("왜 부족한가요?")]);
        assert!(session.input.is_empty());
        assert!(session.is_busy());
    }

    #[test]
    fn test_second_send_while_busy_is_rejected() {
        let mut session = ready_session();
        session.begin_send().unwrap();
        session.input = "another".to_string();

        assert_eq!(session.begin_send(), Err(ChatValidationError::Busy));
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn test_complete_appends_exactly_one_reply() {
        let mut session = ready_session();
        let pending = session.begin_send().unwrap();

        assert!(session.complete(pending.token, Ok("답변".to_string())));
        assert!(!session.complete(pending.token, Ok("중복".to_string())));

        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1], ChatMessage::assistant("답변"));
        assert!(!session.is_busy());
    }

    #[test]
    fn test_failure_appends_fixed_message() {
        let mut session = ready_session();
        let pending = session.begin_send().unwrap();

        session.complete(pending.token, Err("HTTP 502".to_string()));

        assert_eq!(session.messages()[1].content, CHAT_FAILURE_MESSAGE);
    }

    #[test]
    fn test_clear_discards_in_flight_response() {
        let mut session = ready_session();
        let pending = session.begin_send().unwrap();

        session.clear();

        assert!(!session.complete(pending.token, Ok("late".to_string())));
        assert!(session.messages().is_empty());
        assert!(!session.is_busy());
    }

    #[test]
    fn test_restart_switches_segment_and_drops_old_reply() {
        let mut session = ready_session();
        let old = session.begin_send().unwrap();

        session.restart(&ChatQuery::for_segment("울산", BloodType::B, 3));

        assert_eq!(session.region.as_deref(), Some("울산"));
        assert_eq!(session.blood_type, Some(BloodType::B));
        assert_eq!(session.month, 3);
        assert_eq!(session.input, prefill_question("울산", BloodType::B, 3));
        assert!(session.messages().is_empty());
        assert!(!session.is_busy());

        let fresh = session.begin_send().unwrap();
        assert_ne!(fresh.token, old.token);
        assert!(!session.complete(old.token, Ok("부산 답변".to_string())));
        assert!(session.complete(fresh.token, Ok("울산 답변".to_string())));
        assert_eq!(session.messages()[1], ChatMessage::assistant("울산 답변"));
    }

    #[test]
    fn test_from_query_presets_and_prefills() {
        let query = ChatQuery::for_segment("부산", BloodType::O, 3);

        let session = ChatSession::from_query(&query);

        assert_eq!(session.region.as_deref(), Some("부산"));
        assert_eq!(session.blood_type, Some(BloodType::O));
        assert_eq!(session.month, 3);
        assert_eq!(session.input, prefill_question("부산", BloodType::O, 3));
    }

    #[test]
    fn test_from_query_ignores_bad_values() {
        let query = ChatQuery {
            region: Some("부산".to_string()),
            blood_type: Some("Z".to_string()),
            month: Some(9),
        };

        let session = ChatSession::from_query(&query);

        assert_eq!(session.blood_type, None);
        assert_eq!(session.month, 1);
        assert!(session.input.is_empty());
    }
}
