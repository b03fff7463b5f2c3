//! Estado de una lista cargada remotamente
//!
//! Un fallo y una lista vacía son estados distintos.

use crate::cache::QueryState;
use crate::utils::errors::AppResult;

#[derive(Debug, Clone, PartialEq)]
pub enum ListState<T> {
    Loading,
    Error(String),
    Empty,
    Ready(Vec<T>),
}

impl<T> ListState<T> {
    pub fn from_result(result: AppResult<Vec<T>>) -> Self {
        match result {
            Ok(items) if items.is_empty() => ListState::Empty,
            Ok(items) => ListState::Ready(items),
            Err(e) => ListState::Error(e.to_string()),
        }
    }

    /// Estado mientras la consulta sigue en vuelo, o `None` si ya terminó
    pub fn pending(state: &QueryState) -> Option<Self> {
        match state {
            QueryState::Idle | QueryState::Loading => Some(ListState::Loading),
            QueryState::Error(message) => Some(ListState::Error(message.clone())),
            QueryState::Success => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ListState::Error(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ListState::Empty)
    }

    pub fn items(&self) -> &[T] {
        match self {
            ListState::Ready(items) => items,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::http_error;

    #[test]
    fn test_error_and_empty_are_distinct() {
        let failed: ListState<u32> = ListState::from_result(Err(http_error(500, "Error fetching fleet appointments")));
        let empty: ListState<u32> = ListState::from_result(Ok(vec![]));

        assert!(failed.is_error());
        assert!(!failed.is_empty());
        assert!(empty.is_empty());
        assert!(!empty.is_error());
        assert_ne!(failed, empty);
    }

    #[test]
    fn test_ready_keeps_items() {
        let ready = ListState::from_result(Ok(vec![3, 1, 2]));
        assert_eq!(ready.items(), &[3, 1, 2]);
    }

    #[test]
    fn test_pending_from_query_state() {
        assert_eq!(ListState::<u32>::pending(&QueryState::Loading), Some(ListState::Loading));
        assert_eq!(
            ListState::<u32>::pending(&QueryState::Error("boom".to_string())),
            Some(ListState::Error("boom".to_string()))
        );
        assert_eq!(ListState::<u32>::pending(&QueryState::Success), None);
    }
}
