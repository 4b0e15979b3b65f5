/// API fetch state enum
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    NotStarted,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&String> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> From<Result<T, String>> for FetchState<T> {
    fn from(result: Result<T, String>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(err) => Self::Error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_started() {
        let state: FetchState<u32> = FetchState::default();
        assert_eq!(state, FetchState::NotStarted);
        assert!(state.data().is_none());
    }

    #[test]
    fn test_from_result() {
        let ok: FetchState<u32> = Ok(3).into();
        assert_eq!(ok.data(), Some(&3));
        assert!(!ok.is_loading());

        let err: FetchState<u32> = Err("offline".to_string()).into();
        assert_eq!(err.error().map(String::as_str), Some("offline"));
    }
}
