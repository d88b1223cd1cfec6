use machex::domain::config::ApiConfig;
use machex::kernel::server::{ApiState, ApiStateError};
use machex_server::Server;

fn in_memory_config() -> ApiConfig {
    let mut cfg = ApiConfig::default();
    cfg.database.url = "mem://".to_owned();
    cfg.database.credentials = None;
    cfg
}

#[tokio::test]
async fn bootstrap_registers_every_feature_slice() {
    let server = Server::builder()
        .config(in_memory_config())
        .build()
        .await
        .expect("bootstrap against mem://");

    let state = server.state();
    assert!(state.get_slice::<machex::features::catalog::Catalog>().is_some());
    assert!(state.get_slice::<machex::features::iam::Iam>().is_some());
    assert!(state.get_slice::<machex::features::audit::Audit>().is_some());
}

#[tokio::test]
async fn unregistered_slice_is_an_error_not_a_panic() {
    #[derive(Debug)]
    struct Ghost;

    impl machex::domain::registry::FeatureSlice for Ghost {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    let server = Server::builder()
        .config(in_memory_config())
        .build()
        .await
        .expect("bootstrap against mem://");

    let err = server.state().try_get_slice::<Ghost>().unwrap_err();
    assert!(matches!(err, ApiStateError::MissingSlice { .. }));
}

#[tokio::test]
async fn state_builder_rejects_missing_components() {
    let err = ApiState::builder().build().unwrap_err();
    assert!(matches!(err, ApiStateError::Validation { .. }));
    assert!(err.to_string().contains("configuration"));

    let err = ApiState::builder().config(ApiConfig::default()).build().unwrap_err();
    assert!(matches!(err, ApiStateError::Validation { .. }));
    assert!(err.to_string().contains("database"));
}
