use crate::error::AppError;
use crate::models::results::ResultRow;

const MAX_PLAYER_LEN: usize = 64;
const MAX_BATCH_SIZE: usize = 1000;

pub fn validate_player(player: &str) -> Result<String, AppError> {
    let trimmed = player.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Player must not be empty".into()));
    }
    Ok(trimmed.chars().take(MAX_PLAYER_LEN).collect())
}

pub fn validate_position(position: i64) -> Result<(), AppError> {
    if position < 1 {
        Err(AppError::BadRequest(format!(
            "Position must be at least 1, got {}",
            position
        )))
    } else {
        Ok(())
    }
}

pub fn validate_points(points: i64) -> Result<(), AppError> {
    if points < 0 {
        Err(AppError::BadRequest("Points cannot be negative".into()))
    } else {
        Ok(())
    }
}

pub fn validate_batch(results: &[ResultRow]) -> Result<(), AppError> {
    if results.is_empty() {
        return Err(AppError::BadRequest("Result batch must not be empty".into()));
    }
    if results.len() > MAX_BATCH_SIZE {
        return Err(AppError::BadRequest(format!(
            "Result batch too large (max {})",
            MAX_BATCH_SIZE
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_is_trimmed_and_capped() {
        assert_eq!(validate_player("  rally_ace  ").unwrap(), "rally_ace");
        let long = "x".repeat(200);
        assert_eq!(validate_player(&long).unwrap().len(), MAX_PLAYER_LEN);
    }

    #[test]
    fn empty_player_rejected() {
        assert!(validate_player("   ").is_err());
    }

    #[test]
    fn position_must_be_positive() {
        assert!(validate_position(1).is_ok());
        assert!(validate_position(0).is_err());
        assert!(validate_position(-3).is_err());
    }

    #[test]
    fn points_cannot_be_negative() {
        assert!(validate_points(0).is_ok());
        assert!(validate_points(-1).is_err());
    }

    #[test]
    fn empty_batch_rejected() {
        assert!(validate_batch(&[]).is_err());
    }
}
