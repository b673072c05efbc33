use crate::{
    api::{leave, stats, task, user},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    governor::middleware::NoOpMiddleware, Governor, GovernorConfigBuilder, PeerIpKeyExtractor,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(build_limiter(config.rate_login_per_min))
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/logout")
                    .wrap(build_limiter(config.rate_login_per_min))
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(build_limiter(config.rate_protected_per_min)) // rate limiting
            .service(handlers::session)
            .service(
                web::scope("/leave")
                    // /leave
                    .service(
                        web::resource("")
                            .route(web::get().to(leave::leave_list))
                            .route(web::post().to(leave::create_leave)),
                    )
                    // /leave/{id}/approve
                    .service(
                        web::resource("/{id}/approve").route(web::put().to(leave::approve_leave)),
                    )
                    // /leave/{id}/reject
                    .service(
                        web::resource("/{id}/reject").route(web::put().to(leave::reject_leave)),
                    ),
            )
            .service(
                web::scope("/tasks")
                    // /tasks
                    .service(
                        web::resource("")
                            .route(web::get().to(task::task_list))
                            .route(web::post().to(task::create_task)),
                    )
                    // /tasks/{id}/status
                    .service(
                        web::resource("/{id}/status").route(web::put().to(task::update_task_status)),
                    )
                    // /tasks/{id}/comments
                    .service(
                        web::resource("/{id}/comments").route(web::post().to(task::add_comment)),
                    ),
            )
            .service(
                web::scope("/users")
                    // /users
                    .service(web::resource("").route(web::get().to(user::list_users)))
                    // /users/{id}/allowances
                    .service(
                        web::resource("/{id}/allowances")
                            .route(web::put().to(user::update_allowances)),
                    ),
            )
            .service(web::resource("/balance").route(web::get().to(user::my_balance)))
            .service(web::resource("/stats").route(web::get().to(stats::dashboard_stats))),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{leave::LeaveStore, policy::TransitionPolicy, task::TaskStore, user::UserStore};
    use actix_web::http::StatusCode;
    use actix_web::{test, web::Data, App};
    use chrono::Local;
    use serde_json::{json, Value};
    use std::net::SocketAddr;

    fn test_config() -> Config {
        Config {
            server_addr: "127.0.0.1:0".into(),
            jwt_secret: "test-secret".into(),
            session_ttl: 3600,
            rate_login_per_min: 10_000,
            rate_protected_per_min: 10_000,
            api_prefix: "/api/v1".into(),
            transition_policy: TransitionPolicy::Free,
        }
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:12345".parse().unwrap()
    }

    macro_rules! test_app {
        () => {{
            let config = test_config();
            test::init_service(
                App::new()
                    .app_data(Data::new(UserStore::seeded()))
                    .app_data(Data::new(
                        LeaveStore::seeded(config.transition_policy).unwrap(),
                    ))
                    .app_data(Data::new(
                        TaskStore::seeded(config.transition_policy).unwrap(),
                    ))
                    .app_data(Data::new(config.clone()))
                    .configure(|cfg| configure(cfg, config)),
            )
            .await
        }};
    }

    macro_rules! login {
        ($app:expr, $email:expr, $password:expr) => {{
            let req = test::TestRequest::post()
                .uri("/auth/login")
                .peer_addr(peer())
                .set_json(json!({ "email": $email, "password": $password }))
                .to_request();
            let body: Value = test::call_and_read_body_json(&$app, req).await;
            body
        }};
    }

    macro_rules! token {
        ($app:expr, $email:expr, $password:expr) => {{
            let body = login!($app, $email, $password);
            body["token"].as_str().expect("login should succeed").to_owned()
        }};
    }

    #[actix_web::test]
    async fn login_routes_each_role_to_its_dashboard() {
        let app = test_app!();

        let body = login!(app, "admin@company.com", "admin123");
        assert_eq!(body["redirect"], "/admin");
        assert_eq!(body["user"]["role"], "admin");
        assert_eq!(body["user"]["name"], "Admin User");

        let body = login!(app, "finance@company.com", "finance123");
        assert_eq!(body["redirect"], "/finance");

        let body = login!(app, "john@company.com", "user123");
        assert_eq!(body["redirect"], "/dashboard");
        assert_eq!(body["user"]["id"], 2);
    }

    #[actix_web::test]
    async fn login_failure_does_not_reveal_which_field_was_wrong() {
        let app = test_app!();

        for (email, password) in [
            ("john@company.com", "wrong-password"),
            ("nobody@company.com", "user123"),
        ] {
            let req = test::TestRequest::post()
                .uri("/auth/login")
                .peer_addr(peer())
                .set_json(json!({ "email": email, "password": password }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], "Invalid credentials");
        }
    }

    #[actix_web::test]
    async fn protected_routes_require_a_token() {
        let app = test_app!();
        let req = test::TestRequest::get()
            .uri("/api/v1/leave")
            .peer_addr(peer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn leave_application_end_to_end() {
        let app = test_app!();
        let token = token!(app, "john@company.com", "user123");

        let req = test::TestRequest::post()
            .uri("/api/v1/leave")
            .peer_addr(peer())
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({
                "type": "Vacation",
                "start_date": "2024-03-01",
                "end_date": "2024-03-05",
                "reason": "Family trip"
            }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created["status"], "pending");
        assert_eq!(created["days"], 5);
        assert_eq!(created["type"], "Vacation");
        assert_eq!(
            created["applied_date"],
            Local::now().date_naive().to_string()
        );

        // the employee list is scoped to their own records
        let req = test::TestRequest::get()
            .uri("/api/v1/leave")
            .peer_addr(peer())
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        let data = listed["data"].as_array().unwrap();
        assert!(data.iter().all(|r| r["employee_id"] == 2));
        assert!(data.iter().any(|r| r["id"] == created["id"]));
    }

    #[actix_web::test]
    async fn finance_decision_is_visible_to_the_employee() {
        let app = test_app!();
        let finance = token!(app, "finance@company.com", "finance123");

        // seeded request 2 belongs to John and is pending
        let req = test::TestRequest::put()
            .uri("/api/v1/leave/2/approve")
            .peer_addr(peer())
            .insert_header(("Authorization", format!("Bearer {finance}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let john = token!(app, "john@company.com", "user123");
        let req = test::TestRequest::get()
            .uri("/api/v1/leave?filter_by=approved")
            .peer_addr(peer())
            .insert_header(("Authorization", format!("Bearer {john}")))
            .to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert!(listed["data"].as_array().unwrap().iter().any(|r| r["id"] == 2));
    }

    #[actix_web::test]
    async fn employee_cannot_decide_leave_or_manage_users() {
        let app = test_app!();
        let token = token!(app, "john@company.com", "user123");

        for req in [
            test::TestRequest::put()
                .uri("/api/v1/leave/2/approve")
                .peer_addr(peer())
                .insert_header(("Authorization", format!("Bearer {token}")))
                .to_request(),
            test::TestRequest::get()
                .uri("/api/v1/users")
                .peer_addr(peer())
                .insert_header(("Authorization", format!("Bearer {token}")))
                .to_request(),
            test::TestRequest::post()
                .uri("/api/v1/tasks")
                .peer_addr(peer())
                .insert_header(("Authorization", format!("Bearer {token}")))
                .set_json(json!({
                    "title": "x", "description": "y", "assigned_to": 3,
                    "start_date": "2024-04-01", "deadline": "2024-04-02"
                }))
                .to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        }
    }

    #[actix_web::test]
    async fn task_mutations_are_scoped_to_the_assignee() {
        let app = test_app!();

        // task 1 belongs to John (id 2); Jane may not move it
        let jane = token!(app, "jane@company.com", "user123");
        let req = test::TestRequest::put()
            .uri("/api/v1/tasks/1/status")
            .peer_addr(peer())
            .insert_header(("Authorization", format!("Bearer {jane}")))
            .set_json(json!({ "status": "completed" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let john = token!(app, "john@company.com", "user123");
        let req = test::TestRequest::put()
            .uri("/api/v1/tasks/1/status")
            .peer_addr(peer())
            .insert_header(("Authorization", format!("Bearer {john}")))
            .set_json(json!({ "status": "completed" }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["status"], "completed");

        // whitespace-only comment is a 400, thread untouched
        let req = test::TestRequest::post()
            .uri("/api/v1/tasks/1/comments")
            .peer_addr(peer())
            .insert_header(("Authorization", format!("Bearer {john}")))
            .set_json(json!({ "text": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn admin_creates_task_for_known_employee_only() {
        let app = test_app!();
        let admin = token!(app, "admin@company.com", "admin123");

        let req = test::TestRequest::post()
            .uri("/api/v1/tasks")
            .peer_addr(peer())
            .insert_header(("Authorization", format!("Bearer {admin}")))
            .set_json(json!({
                "title": "Audit access logs", "description": "Quarterly review",
                "assigned_to": 99, "start_date": "2024-04-01", "deadline": "2024-04-10"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/v1/tasks")
            .peer_addr(peer())
            .insert_header(("Authorization", format!("Bearer {admin}")))
            .set_json(json!({
                "title": "Audit access logs", "description": "Quarterly review",
                "assigned_to": 4, "start_date": "2024-04-01", "deadline": "2024-04-10"
            }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created["status"], "pending");
        assert_eq!(created["assigned_to_name"], "Mike Johnson");
        assert_eq!(created["comments"], json!([]));
    }

    #[actix_web::test]
    async fn logout_revokes_the_session() {
        let app = test_app!();
        let token = token!(app, "mike@company.com", "user123");

        let req = test::TestRequest::get()
            .uri("/api/v1/session")
            .peer_addr(peer())
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let session: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(session["email"], "mike@company.com");

        let req = test::TestRequest::post()
            .uri("/auth/logout")
            .peer_addr(peer())
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri("/api/v1/session")
            .peer_addr(peer())
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn stats_follow_store_mutations() {
        let app = test_app!();
        let admin = token!(app, "admin@company.com", "admin123");

        let req = test::TestRequest::get()
            .uri("/api/v1/stats")
            .peer_addr(peer())
            .insert_header(("Authorization", format!("Bearer {admin}")))
            .to_request();
        let before: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(before["pending_leaves"], 3);
        assert_eq!(before["approved_leaves"], 2);

        let req = test::TestRequest::put()
            .uri("/api/v1/leave/4/approve")
            .peer_addr(peer())
            .insert_header(("Authorization", format!("Bearer {admin}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/v1/stats")
            .peer_addr(peer())
            .insert_header(("Authorization", format!("Bearer {admin}")))
            .to_request();
        let after: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(after["pending_leaves"], 2);
        assert_eq!(after["approved_leaves"], 3);
    }

    #[actix_web::test]
    async fn task_list_supports_search_sort_and_week_filter() {
        let app = test_app!();
        let admin = token!(app, "admin@company.com", "admin123");

        // search narrows by title/description/assignee substring
        let req = test::TestRequest::get()
            .uri("/api/v1/tasks?search=report&sort_by=title")
            .peer_addr(peer())
            .insert_header(("Authorization", format!("Bearer {admin}")))
            .to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed["total"], 1);
        assert_eq!(listed["data"][0]["title"], "Prepare Monthly Report");

        // seeded deadlines are all in January 2024, never "this week"
        let req = test::TestRequest::get()
            .uri("/api/v1/tasks?filter_by=this-week")
            .peer_addr(peer())
            .insert_header(("Authorization", format!("Bearer {admin}")))
            .to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed["total"], 0);
    }
}
