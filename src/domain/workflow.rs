//! Evaluation status lifecycle.

use thiserror::Error;

use crate::entities::sea_orm_active_enums::EvaluationStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("evaluation cannot move from {from} to {to}")]
    InvalidTransition { from: &'static str, to: &'static str },

    #[error("evaluation is completed and can no longer be changed")]
    Locked,
}

/// Statuses that require a score sheet with exactly 100 credits.
pub fn requires_complete_sheet(status: EvaluationStatus) -> bool {
    matches!(status, EvaluationStatus::Submitted | EvaluationStatus::Completed)
}

pub fn check_transition(from: EvaluationStatus, to: EvaluationStatus) -> Result<(), WorkflowError> {
    use EvaluationStatus::*;

    match (from, to) {
        (Draft, Submitted) | (Draft, Completed) | (Submitted, Completed) | (Submitted, Draft) => {
            Ok(())
        }
        (Completed, _) => Err(WorkflowError::Locked),
        _ => Err(WorkflowError::InvalidTransition {
            from: from.as_str(),
            to: to.as_str(),
        }),
    }
}

/// Score sheets may only be replaced while the evaluation is still open.
pub fn ensure_editable(status: EvaluationStatus) -> Result<(), WorkflowError> {
    if status == EvaluationStatus::Completed {
        return Err(WorkflowError::Locked);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use EvaluationStatus::*;

    #[test]
    fn forward_moves_are_allowed() {
        assert!(check_transition(Draft, Submitted).is_ok());
        assert!(check_transition(Submitted, Completed).is_ok());
        assert!(check_transition(Draft, Completed).is_ok());
        assert!(check_transition(Submitted, Draft).is_ok());
    }

    #[test]
    fn completed_is_terminal() {
        for to in [Draft, Submitted, Completed] {
            assert_eq!(check_transition(Completed, to), Err(WorkflowError::Locked));
        }
        assert_eq!(ensure_editable(Completed), Err(WorkflowError::Locked));
        assert!(ensure_editable(Submitted).is_ok());
    }

    #[test]
    fn staying_put_is_not_a_transition() {
        assert!(matches!(
            check_transition(Draft, Draft),
            Err(WorkflowError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn only_open_states_skip_the_credit_check() {
        assert!(!requires_complete_sheet(Draft));
        assert!(requires_complete_sheet(Submitted));
        assert!(requires_complete_sheet(Completed));
    }
}
