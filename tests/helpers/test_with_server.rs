#[macro_export]
macro_rules! test_with_server {
    ($name:ident, |$server:ident, $ctx_state:ident, $config:ident| $body:block) => {
        $crate::test_with_server!(
            $name,
            freelinkd_server::entities::project::project_status::TransitionPolicy::Permissive,
            |$server, $ctx_state, $config| $body
        );
    };
    ($name:ident, $policy:expr, |$server:ident, $ctx_state:ident, $config:ident| $body:block) => {

        #[tokio::test(flavor="multi_thread")]
        #[serial_test::serial]
        async fn $name() {
            use axum_test::{TestServer, TestServerConfig};
            use freelinkd_server::config::AppConfig;
            use freelinkd_server::database::client::{Database, DbConfig};
            use freelinkd_server::middleware::mw_ctx::create_ctx_state;
            use futures::FutureExt;
            use std::panic::resume_unwind;

            let $config = AppConfig {
                db_namespace: "test".to_string(),
                db_database: "test".to_string(),
                db_password: None,
                db_username: None,
                db_url: "mem://".to_string(),
                server_port: 0,
                upload_file_size_max_mb: 1,
                transition_policy: $policy,
            };

            let $ctx_state = {
                let db = Database::connect(DbConfig {
                    url: &$config.db_url,
                    database: &$config.db_database,
                    namespace: &$config.db_namespace,
                    password: $config.db_password.as_deref(),
                    username: $config.db_username.as_deref(),
                })
                .await
                .expect("test database connects");

                db.run_migrations().await.expect("migrations run");
                create_ctx_state(db, &$config)
            };

            let routes_all = freelinkd_server::init::main_router(&$ctx_state.clone());

            let $server = TestServer::new_with_config(
                routes_all,
                TestServerConfig {
                    transport: None,
                    save_cookies: false,
                    expect_success_by_default: false,
                    restrict_requests_with_http_schema: false,
                    default_content_type: None,
                    default_scheme: None,
                },
            )
            .expect("Failed to create test server");

            let test_result = std::panic::AssertUnwindSafe(async {
                (|| async $body)().await;
            })
            .catch_unwind()
            .await;

            $ctx_state
                .db
                .remove_database(&$config.db_database)
                .await
                .expect("failed to remove database");

            if let Err(panic) = test_result {
                resume_unwind(panic);
            }
        }
    };
}
