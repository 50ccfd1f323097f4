#[cfg(test)]
mod tests {
    use crate::error::*;

    #[test]
    fn test_unsupported_error() {
        let err = Error::Unsupported;
        assert_eq!(err.to_string(), "Immersive AR is not supported on this device");
    }

    #[test]
    fn test_session_start_error() {
        let err = Error::SessionStart("NotAllowedError".to_string());
        assert_eq!(
            err.to_string(),
            "AR session could not be started: NotAllowedError"
        );
    }

    #[test]
    fn test_hit_test_error_keeps_session() {
        let err = Error::HitTestSource("no viewer space".to_string());
        assert_eq!(
            err.to_string(),
            "Hit-test source request failed: no viewer space"
        );
    }

    #[test]
    fn test_asset_load_error() {
        let err = Error::AssetLoad("404".to_string());
        assert_eq!(err.to_string(), "Model could not be loaded: 404");
    }

    #[test]
    fn test_invalid_pose_error() {
        let err = Error::InvalidPose(12);
        assert_eq!(
            err.to_string(),
            "Invalid pose matrix: expected 16 finite values, got 12"
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_anyhow_is_transparent() {
        let err: Error = anyhow::anyhow!("decoder exploded").into();
        assert_eq!(err.to_string(), "decoder exploded");
    }
}
