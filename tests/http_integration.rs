//! Integration tests for commands against a mocked ClickUp API
//!
//! These tests drive parsed commands end to end through the client and
//! check the requests that reach the server and the shaped output.

mod common;

use clicli::config::ConfigKey;
use clicli::error::CommandError;
use common::{data, run, session, tasks, TOKEN};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn command_error(err: &anyhow::Error) -> &CommandError {
    err.downcast_ref::<CommandError>()
        .unwrap_or_else(|| panic!("expected a command error, got {:#}", err))
}

mod transport_tests {
    use super::*;

    /// Every request carries the raw token in Authorization
    #[tokio::test]
    async fn test_token_sent_and_fields_stripped() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/team"))
            .and(header("Authorization", TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "teams": [
                    {"id": "1", "name": "Acme", "color": "#123456", "members": [{"user": {}}], "roles": [1]}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[], true);
        let out = data(run(&mut session, &["teams", "list", "--include-roles"]).await.unwrap());

        assert_eq!(
            out,
            json!({"teams": [{"id": "1", "name": "Acme", "color": "#123456", "roles": [1]}]})
        );
    }

    /// Error statuses surface the body instead of swallowing it
    #[tokio::test]
    async fn test_401_returns_remote_error_with_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/team"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "err": "Token invalid",
                "ECODE": "OAUTH_025"
            })))
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[], true);
        let err = run(&mut session, &["teams", "list"]).await.unwrap_err();

        match command_error(&err) {
            CommandError::Remote { status, body } => {
                assert_eq!(*status, 401);
                assert_eq!(body["ECODE"], "OAUTH_025");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    /// A body that is not JSON ends the command
    #[tokio::test]
    async fn test_malformed_body_is_fatal() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/team"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[], true);
        let err = run(&mut session, &["teams", "list"]).await.unwrap_err();

        assert!(matches!(
            command_error(&err),
            CommandError::MalformedResponse(_)
        ));
    }

    /// No token anywhere: nothing is sent
    #[tokio::test]
    async fn test_missing_token_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"teams": []})))
            .expect(0)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[], true);
        session.config = clicli::config::ConfigStore::in_memory();

        let err = run(&mut session, &["teams", "list"]).await.unwrap_err();
        assert!(matches!(command_error(&err), CommandError::MissingCredential));
    }

    /// A token passed explicitly beats the stored one
    #[tokio::test]
    async fn test_explicit_token_wins() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/team"))
            .and(header("Authorization", "pk_override"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"teams": []})))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[], true);
        session.api_key = Some("pk_override".to_string());

        tokio_test::assert_ok!(run(&mut session, &["teams", "list"]).await);
    }
}

mod resolution_tests {
    use super::*;

    /// Config fallback fills the path; `archived=false` never reaches the wire
    #[tokio::test]
    async fn test_spaces_list_uses_config_team() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/team/77/space"))
            .and(query_param_is_missing("archived"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "spaces": [{"id": "5", "name": "Eng", "features": {}, "statuses": []}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[(ConfigKey::TeamId, "77")], true);
        let out = data(run(&mut session, &["spaces", "list"]).await.unwrap());

        assert_eq!(out, json!({"spaces": [{"id": "5", "name": "Eng"}]}));
    }

    /// Explicit flag wins over config and archived=true is sent
    #[tokio::test]
    async fn test_spaces_list_explicit_team() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/team/88/space"))
            .and(query_param("archived", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"spaces": []})))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[(ConfigKey::TeamId, "77")], true);
        run(&mut session, &["spaces", "list", "-t", "88", "-a"])
            .await
            .unwrap();
    }

    /// Missing required id: reported, no network call
    #[tokio::test]
    async fn test_missing_space_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[], true);
        let err = run(&mut session, &["folders", "list"]).await.unwrap_err();

        assert!(matches!(
            command_error(&err),
            CommandError::MissingConfig(ConfigKey::SpaceId)
        ));
    }

    /// Both parents given: the folder is queried
    #[tokio::test]
    async fn test_lists_list_prefers_folder() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/folder/10/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"lists": []})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/space/20/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"lists": []})))
            .expect(0)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[], true);
        run(&mut session, &["lists", "list", "-f", "10", "-s", "20"])
            .await
            .unwrap();
    }

    /// An explicit space beats a folder that only lives in config
    #[tokio::test]
    async fn test_lists_list_explicit_space_beats_config_folder() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/space/20/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "lists": [
                    {"id": "1", "name": "Mine", "assignee": {"id": 183, "username": "ada"}},
                    {"id": "2", "name": "Theirs", "assignee": {"id": 9, "username": "bob"}},
                    {"id": "3", "name": "Nobody's", "assignee": null}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(
            &server.uri(),
            &[(ConfigKey::FolderId, "10"), (ConfigKey::User, "183")],
            true,
        );
        let out = data(
            run(&mut session, &["lists", "list", "-s", "20", "--me"])
                .await
                .unwrap(),
        );

        let names: Vec<&str> = out["lists"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Mine"]);
    }

    /// `--me` without a configured user reports the gap and lists everything
    #[tokio::test]
    async fn test_lists_list_me_without_user_is_unfiltered() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/space/20/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "lists": [
                    {"id": "1", "name": "Mine", "assignee": {"id": 183}},
                    {"id": "2", "name": "Theirs", "assignee": {"id": 9}},
                    {"id": "3", "name": "Nobody's", "assignee": null}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[(ConfigKey::SpaceId, "20")], true);
        let out = data(run(&mut session, &["lists", "list", "--me"]).await.unwrap());

        let names: Vec<&str> = out["lists"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Mine", "Theirs", "Nobody's"]);
    }
}

mod pagination_tests {
    use super::*;

    /// Pages of 100, 100 and 37: three requests, 237 tasks
    #[tokio::test]
    async fn test_collect_all_stops_on_short_page() {
        let server = MockServer::start().await;

        for (page, first, count) in [("0", 0, 100), ("1", 100, 100), ("2", 200, 37)] {
            Mock::given(method("GET"))
                .and(path("/list/42/task"))
                .and(query_param("page", page))
                .respond_with(ResponseTemplate::new(200).set_body_json(tasks(first, count)))
                .expect(1)
                .mount(&server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path("/list/42/task"))
            .and(query_param("page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tasks(0, 0)))
            .expect(0)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[], true);
        let out = data(
            run(&mut session, &["tasks", "list", "-l", "42", "--all"])
                .await
                .unwrap(),
        );

        let all = out["tasks"].as_array().unwrap();
        assert_eq!(all.len(), 237);
        assert_eq!(all[0]["id"], "t0");
        assert_eq!(all[236]["id"], "t236");
        assert!(out.get("page").is_none());
    }

    /// An exact multiple of the page size needs one extra empty page
    #[tokio::test]
    async fn test_collect_all_full_then_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/list/42/task"))
            .and(query_param("page", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tasks(0, 100)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/list/42/task"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tasks(0, 0)))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[], true);
        let out = data(
            run(&mut session, &["tasks", "list", "-l", "42", "--all"])
                .await
                .unwrap(),
        );
        assert_eq!(out["tasks"].as_array().unwrap().len(), 100);
    }

    /// A full first page is tagged with its page number
    #[tokio::test]
    async fn test_single_full_page_is_annotated() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/list/42/task"))
            .and(query_param("page", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tasks(0, 100)))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[], true);
        let out = data(run(&mut session, &["tasks", "list", "-l", "42"]).await.unwrap());

        assert_eq!(out["page"], json!(0));
    }

    /// A short first page is not tagged
    #[tokio::test]
    async fn test_single_short_page_is_not_annotated() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/list/42/task"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tasks(0, 40)))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[], true);
        let out = data(run(&mut session, &["tasks", "list", "-l", "42"]).await.unwrap());

        assert!(out.get("page").is_none());
        assert_eq!(out["tasks"].as_array().unwrap().len(), 40);
    }

    /// Filters become query parameters; unset ones are left out
    #[tokio::test]
    async fn test_filters_on_the_wire() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/list/42/task"))
            .and(query_param("page", "2"))
            .and(query_param("order_by", "due_date"))
            .and(query_param("statuses[]", "in progress"))
            .and(query_param("due_date_gt", "86400000"))
            .and(query_param_is_missing("reverse"))
            .and(query_param_is_missing("archived"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tasks(0, 3)))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[], true);
        let out = data(
            run(
                &mut session,
                &[
                    "tasks",
                    "list",
                    "-l",
                    "42",
                    "--page",
                    "2",
                    "--order-by",
                    "due_date",
                    "--status",
                    "in progress",
                    "--due-date-gt",
                    "1970-01-02",
                ],
            )
            .await
            .unwrap(),
        );

        assert_eq!(out["page"], json!(2));
    }
}

mod lookup_tests {
    use super::*;

    /// Duplicate names resolve to the first entry the service returns
    #[tokio::test]
    async fn test_lists_get_by_name_takes_first_match() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/space/20/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "lists": [
                    {"name": "A", "id": 1},
                    {"name": "B", "id": 2},
                    {"name": "A", "id": 3}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/list/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "1", "name": "A", "content": "first"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[(ConfigKey::SpaceId, "20")], true);
        let out = data(run(&mut session, &["lists", "get", "A"]).await.unwrap());

        assert_eq!(out["content"], "first");
    }

    /// Numeric argument skips the lookup
    #[tokio::test]
    async fn test_lists_get_by_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/list/901"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "901", "name": "Sprint"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[], true);
        let out = data(run(&mut session, &["lists", "get", "901"]).await.unwrap());
        assert_eq!(out["name"], "Sprint");
    }

    /// Unknown name: reported, no update sent
    #[tokio::test]
    async fn test_folder_rename_unknown_name() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/space/20/folder"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "folders": [{"id": "3", "name": "Roadmap"}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[(ConfigKey::SpaceId, "20")], true);
        let err = run(&mut session, &["folders", "rename", "Later", "-n", "roadmap"])
            .await
            .unwrap_err();

        match command_error(&err) {
            CommandError::EntityNotFound { kind, name } => {
                assert_eq!(*kind, "folder");
                assert_eq!(name, "roadmap");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    /// Rename by name sends a JSON body to the matched folder
    #[tokio::test]
    async fn test_folder_rename_by_name() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/space/20/folder"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "folders": [{"id": "3", "name": "Roadmap"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/folder/3"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({"name": "Later"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "3", "name": "Later"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[(ConfigKey::SpaceId, "20")], true);
        let out = data(
            run(&mut session, &["folders", "rename", "Later", "-n", "Roadmap"])
                .await
                .unwrap(),
        );
        assert_eq!(out["name"], "Later");
    }
}

mod mutation_tests {
    use super::*;

    /// Declining the prompt sends nothing
    #[tokio::test]
    async fn test_declined_remove_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[], false);

        let err = run(&mut session, &["lists", "remove", "5"]).await.unwrap_err();
        assert!(matches!(
            command_error(&err),
            CommandError::ConfirmationDeclined
        ));

        let err = run(&mut session, &["folders", "remove", "6"])
            .await
            .unwrap_err();
        assert!(matches!(
            command_error(&err),
            CommandError::ConfirmationDeclined
        ));
    }

    /// Dot-segment and blank ids never reach the server
    #[tokio::test]
    async fn test_dot_segment_ids_send_nothing() {
        let server = MockServer::start().await;

        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let base = format!("{}/api/v2/", server.uri());
        let mut session = session(&base, &[], true);

        let err = run(&mut session, &["folders", "remove", "..", "-q"])
            .await
            .unwrap_err();
        assert!(matches!(command_error(&err), CommandError::InvalidId(_)));

        let err = run(&mut session, &["lists", "remove", ".", "-q"])
            .await
            .unwrap_err();
        assert!(matches!(command_error(&err), CommandError::InvalidId(_)));

        let err = run(&mut session, &["folders", "list", "-s", " "])
            .await
            .unwrap_err();
        assert!(matches!(command_error(&err), CommandError::InvalidId(_)));
    }

    /// `--quiet` skips the prompt
    #[tokio::test]
    async fn test_quiet_remove() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/list/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[], false);
        let out = data(run(&mut session, &["lists", "remove", "5", "-q"]).await.unwrap());
        assert_eq!(out, json!({}));
    }

    /// Folderless list creation with only the set fields in the body
    #[tokio::test]
    async fn test_list_create_in_space() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/space/20/list"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({
                "name": "Bugs",
                "content": "Triage here",
                "priority": 1
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "99", "name": "Bugs"})))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[(ConfigKey::SpaceId, "20")], true);
        let out = data(
            run(&mut session, &["lists", "create", "Bugs", "Triage here", "-p", "1"])
                .await
                .unwrap(),
        );
        assert_eq!(out["id"], "99");
    }

    /// Task creation posts to the list and converts numeric assignees
    #[tokio::test]
    async fn test_task_create_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/list/5/task"))
            .and(body_json(json!({
                "name": "Ship it",
                "priority": 2,
                "assignees": [183],
                "due_date": 86_400_000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "t1", "name": "Ship it"})))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[], true);
        let out = data(
            run(
                &mut session,
                &[
                    "tasks", "create", "Ship it", "-l", "5", "-p", "2", "-a", "183", "--due-date",
                    "1970-01-02",
                ],
            )
            .await
            .unwrap(),
        );
        assert_eq!(out["id"], "t1");
    }

    /// Remote errors on writes keep the body too
    #[tokio::test]
    async fn test_folder_create_remote_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/space/20/folder"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "err": "Folder name taken",
                "ECODE": "FOLDER_012"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut session = session(&server.uri(), &[(ConfigKey::SpaceId, "20")], true);
        let err = run(&mut session, &["folders", "create", "Roadmap"])
            .await
            .unwrap_err();

        match command_error(&err) {
            CommandError::Remote { status, body } => {
                assert_eq!(*status, 400);
                assert_eq!(body["err"], "Folder name taken");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
