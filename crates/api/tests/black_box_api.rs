//! Black-box API test: boots the router on an ephemeral port and exercises
//! the authorization boundaries through real HTTP.

use reqwest::StatusCode;
use serde_json::{Value, json};

async fn spawn_app() -> String {
    let app = atrium_api::app::build_app("test-secret".to_string());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

struct Session {
    client: reqwest::Client,
    base: String,
    token: String,
}

impl Session {
    async fn register(base: &str, name: &str, email: &str) -> Session {
        let client = reqwest::Client::new();

        let created = client
            .post(format!("{base}/users"))
            .json(&json!({ "name": name, "email": email, "password": "s3cret" }))
            .send()
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);

        let login = client
            .post(format!("{base}/sessions/password"))
            .json(&json!({ "email": email, "password": "s3cret" }))
            .send()
            .await
            .unwrap();
        assert_eq!(login.status(), StatusCode::CREATED);
        let token = login.json::<Value>().await.unwrap()["token"]
            .as_str()
            .unwrap()
            .to_string();

        Session {
            client,
            base: base.to_string(),
            token,
        }
    }

    async fn post(&self, path: &str, body: Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.base, path))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.base, path))
            .bearer_auth(&self.token)
            .send()
            .await
            .unwrap()
    }

    async fn put(&self, path: &str, body: Value) -> reqwest::Response {
        self.client
            .put(format!("{}{}", self.base, path))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}{}", self.base, path))
            .bearer_auth(&self.token)
            .send()
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn health_is_public() {
    let base = spawn_app().await;
    let response = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let bare = client
        .get(format!("{base}/profile"))
        .send()
        .await
        .unwrap();
    assert_eq!(bare.status(), StatusCode::UNAUTHORIZED);

    let garbled = client
        .get(format!("{base}/profile"))
        .bearer_auth("not.a.token")
        .send()
        .await
        .unwrap();
    assert_eq!(garbled.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() {
    let base = spawn_app().await;
    let alice = Session::register(&base, "Alice", "alice@example.com").await;

    let response = alice
        .client
        .post(format!("{base}/sessions/password"))
        .json(&json!({ "email": "alice@example.com", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_and_member_boundaries() {
    let base = spawn_app().await;

    // Alice founds the organization and is its owner/admin.
    let alice = Session::register(&base, "Alice", "alice@example.com").await;
    let created = alice
        .post("/organizations", json!({ "slug": "acme", "name": "Acme Inc" }))
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    // Admins may create projects and read billing.
    let project = alice
        .post(
            "/organizations/acme/projects",
            json!({ "name": "site", "description": "marketing site" }),
        )
        .await;
    assert_eq!(project.status(), StatusCode::CREATED);
    let alice_project: Value = project.json().await.unwrap();

    assert_eq!(
        alice.get("/organizations/acme/billing").await.status(),
        StatusCode::OK
    );

    // Roles outside the enumerated domain are rejected up front.
    let bad_role = alice
        .post(
            "/organizations/acme/invites",
            json!({ "email": "x@example.com", "role": "OWNER" }),
        )
        .await;
    assert_eq!(bad_role.status(), StatusCode::BAD_REQUEST);

    // Bob joins as MEMBER via an invite.
    let bob = Session::register(&base, "Bob", "bob@example.com").await;
    let invite = alice
        .post(
            "/organizations/acme/invites",
            json!({ "email": "bob@example.com", "role": "MEMBER" }),
        )
        .await;
    assert_eq!(invite.status(), StatusCode::CREATED);
    let invite_id = invite.json::<Value>().await.unwrap()["inviteId"]
        .as_str()
        .unwrap()
        .to_string();

    let accepted = bob.post(&format!("/invites/{invite_id}/accept"), json!({})).await;
    assert_eq!(accepted.status(), StatusCode::NO_CONTENT);

    // Members create projects and delete their own, not others'.
    let bob_project = bob
        .post(
            "/organizations/acme/projects",
            json!({ "name": "api", "description": "backend" }),
        )
        .await;
    assert_eq!(bob_project.status(), StatusCode::CREATED);
    let bob_project: Value = bob_project.json().await.unwrap();

    let foreign = bob
        .delete(&format!(
            "/organizations/acme/projects/{}",
            alice_project["projectId"].as_str().unwrap()
        ))
        .await;
    assert_eq!(foreign.status(), StatusCode::FORBIDDEN);

    let own = bob
        .delete(&format!(
            "/organizations/acme/projects/{}",
            bob_project["projectId"].as_str().unwrap()
        ))
        .await;
    assert_eq!(own.status(), StatusCode::NO_CONTENT);

    // Members may not invite, read org billing, or delete the organization.
    assert_eq!(
        bob.post(
            "/organizations/acme/invites",
            json!({ "email": "carol@example.com", "role": "MEMBER" }),
        )
        .await
        .status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        bob.get("/organizations/acme/billing").await.status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        bob.delete("/organizations/acme").await.status(),
        StatusCode::FORBIDDEN
    );

    // Outsiders are not members at all.
    let eve = Session::register(&base, "Eve", "eve@example.com").await;
    assert_eq!(
        eve.get("/organizations/acme").await.status(),
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn organization_update_is_reserved_to_the_owner() {
    let base = spawn_app().await;

    let alice = Session::register(&base, "Alice", "alice@example.com").await;
    alice
        .post("/organizations", json!({ "slug": "acme", "name": "Acme Inc" }))
        .await;

    // Carol joins as a second ADMIN.
    let carol = Session::register(&base, "Carol", "carol@example.com").await;
    let invite = alice
        .post(
            "/organizations/acme/invites",
            json!({ "email": "carol@example.com", "role": "ADMIN" }),
        )
        .await;
    let invite_id = invite.json::<Value>().await.unwrap()["inviteId"]
        .as_str()
        .unwrap()
        .to_string();
    carol
        .post(&format!("/invites/{invite_id}/accept"), json!({}))
        .await;

    // Both admins can delete projects/read billing, but only the owner may
    // rename or hand over the organization.
    assert_eq!(
        carol.get("/organizations/acme/billing").await.status(),
        StatusCode::OK
    );
    assert_eq!(
        carol
            .put("/organizations/acme", json!({ "name": "Evil Corp" }))
            .await
            .status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        alice
            .put("/organizations/acme", json!({ "name": "Acme Corp" }))
            .await
            .status(),
        StatusCode::NO_CONTENT
    );

    // After alice hands ownership to carol, the boundary flips.
    let carol_id = carol.get("/profile").await.json::<Value>().await.unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();
    let transfer = alice
        .client
        .patch(format!("{}/organizations/acme/owner", alice.base))
        .bearer_auth(&alice.token)
        .json(&json!({ "new_owner_id": carol_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(transfer.status(), StatusCode::NO_CONTENT);

    assert_eq!(
        alice
            .put("/organizations/acme", json!({ "name": "Acme Inc" }))
            .await
            .status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        carol
            .put("/organizations/acme", json!({ "name": "Carol Corp" }))
            .await
            .status(),
        StatusCode::NO_CONTENT
    );
}
