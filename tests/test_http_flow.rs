//! End-to-end HTTP test: spawns the router on an ephemeral port and drives the
//! HTML forms and the JSON API with a real client.

use parking_lot_manager::{transport, ParkingService};
use serde_json::{json, Value};

struct TestServer {
    base_url: String,
    parking: ParkingService,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn spawn_server() -> Result<TestServer, Box<dyn std::error::Error>> {
    let parking = ParkingService::connect("sqlite::memory:", 1).await?;
    let router = transport::http::create_router(transport::http::AppState::new(parking.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    Ok(TestServer {
        base_url: format!("http://{}", addr),
        parking,
        client,
        handle,
    })
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<(u16, String), Box<dyn std::error::Error>> {
        let resp = self.client.post(self.url(path)).form(form).send().await?;
        let status = resp.status().as_u16();
        Ok((status, resp.text().await?))
    }

    async fn get_text(&self, path: &str) -> Result<(u16, String), Box<dyn std::error::Error>> {
        let resp = self.client.get(self.url(path)).send().await?;
        let status = resp.status().as_u16();
        Ok((status, resp.text().await?))
    }

    async fn get_json(&self, path: &str) -> Result<(u16, Value), Box<dyn std::error::Error>> {
        let resp = self.client.get(self.url(path)).send().await?;
        let status = resp.status().as_u16();
        Ok((status, resp.json::<Value>().await?))
    }

    async fn post_json(
        &self,
        path: &str,
        body: Value,
    ) -> Result<(u16, Value), Box<dyn std::error::Error>> {
        let resp = self.client.post(self.url(path)).json(&body).send().await?;
        let status = resp.status().as_u16();
        Ok((status, resp.json::<Value>().await?))
    }
}

#[tokio::test]
async fn html_forms_add_park_and_remove() -> Result<(), Box<dyn std::error::Error>> {
    let server = spawn_server().await?;

    let (status, page) = server.get_text("/add").await?;
    assert_eq!(status, 200);
    assert!(page.contains("name=\"slotNo\""));

    let (status, page) = server.post_form("/add", &[("slotNo", "1")]).await?;
    assert_eq!(status, 200);
    assert!(page.contains("Slot added successfully."));

    let (status, page) = server
        .post_form("/add", &[("slotNo", " 2 "), ("isCovered", "on")])
        .await?;
    assert_eq!(status, 200);
    assert!(page.contains("Slot added successfully."));

    // Only the exact value "on" ticks a checkbox.
    server
        .post_form("/add", &[("slotNo", "3"), ("isEVCharging", "yes")])
        .await?;
    let (_, slot3) = server.get_json("/api/slots/3").await?;
    assert_eq!(slot3["data"]["is_ev_charging"], json!(false));

    let (status, page) = server.post_form("/park", &[("needsCover", "on")]).await?;
    assert_eq!(status, 200);
    assert!(page.contains("Vehicle parked at Slot 2"));

    let (status, page) = server.post_form("/park", &[]).await?;
    assert_eq!(status, 200);
    assert!(page.contains("Vehicle parked at Slot 1"));

    let (status, page) = server.post_form("/park", &[("needsEV", "on")]).await?;
    assert_eq!(status, 200);
    assert!(page.contains("No slot available"));

    let (status, page) = server.get_text("/").await?;
    assert_eq!(status, 200);
    assert!(page.contains("3 slots, 1 free"));
    assert!(page.contains("href=\"/remove/1\""));
    assert!(page.contains("href=\"/remove/2\""));
    assert!(!page.contains("href=\"/remove/3\""));

    let resp = server.client.get(server.url("/remove/2")).send().await?;
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(
        resp.headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/")
    );
    let (_, slot2) = server.get_json("/api/slots/2").await?;
    assert_eq!(slot2["data"]["is_occupied"], json!(false));

    // Unknown slot: still redirects, nothing changes.
    let resp = server.client.get(server.url("/remove/404")).send().await?;
    assert_eq!(resp.status().as_u16(), 303);

    Ok(())
}

#[tokio::test]
async fn html_add_reports_validation_and_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let server = spawn_server().await?;

    let (status, page) = server.post_form("/add", &[("slotNo", "abc")]).await?;
    assert_eq!(status, 400);
    assert!(page.contains("Invalid slot number."));

    let (status, page) = server.post_form("/add", &[("isCovered", "on")]).await?;
    assert_eq!(status, 400);
    assert!(page.contains("Invalid slot number."));

    let (status, page) = server.post_form("/add", &[("slotNo", "0")]).await?;
    assert_eq!(status, 400);
    assert!(page.contains("Slot number must be positive."));

    let (status, page) = server.post_form("/add", &[("slotNo", "-5")]).await?;
    assert_eq!(status, 400);
    assert!(page.contains("Slot number must be positive."));

    let (_, slots) = server.get_json("/api/slots").await?;
    assert_eq!(slots["data"], json!([]));

    server.post_form("/add", &[("slotNo", "3")]).await?;
    let (status, page) = server
        .post_form("/add", &[("slotNo", "3"), ("isCovered", "on")])
        .await?;
    assert_eq!(status, 409);
    assert!(page.contains("Slot 3 already exists."));

    let (_, slots) = server.get_json("/api/slots").await?;
    assert_eq!(slots["data"].as_array().map(|a| a.len()), Some(1));
    assert_eq!(slots["data"][0]["is_covered"], json!(false));

    Ok(())
}

#[tokio::test]
async fn json_api_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let server = spawn_server().await?;

    let (status, health) = server.get_json("/health").await?;
    assert_eq!(status, 200);
    assert_eq!(health["data"]["status"], json!("ok"));

    let (status, created) = server
        .post_json(
            "/api/slots",
            json!({"slot_no": 10, "is_covered": true, "is_ev_charging": true}),
        )
        .await?;
    assert_eq!(status, 201);
    assert_eq!(created["data"]["is_occupied"], json!(false));

    let (status, _) = server.post_json("/api/slots", json!({"slot_no": 4})).await?;
    assert_eq!(status, 201);

    let (status, dup) = server.post_json("/api/slots", json!({"slot_no": 4})).await?;
    assert_eq!(status, 409);
    assert_eq!(dup["success"], json!(false));

    let (status, _) = server.post_json("/api/slots", json!({"slot_no": 0})).await?;
    assert_eq!(status, 400);

    let (status, _) = server.post_json("/api/slots", json!({"slot_no": "x"})).await?;
    assert_eq!(status, 422);

    let (_, list) = server.get_json("/api/slots").await?;
    let numbers: Vec<i64> = list["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["slot_no"].as_i64())
        .collect();
    assert_eq!(numbers, vec![4, 10]);

    let (status, parked) = server.post_json("/api/park", json!({"needs_ev": true})).await?;
    assert_eq!(status, 200);
    assert_eq!(parked["data"]["assigned"], json!(true));
    assert_eq!(parked["data"]["slot"]["slot_no"], json!(10));

    let (_, parked) = server.post_json("/api/park", json!({"needs_covered": true})).await?;
    assert_eq!(parked["data"]["assigned"], json!(false));
    assert_eq!(parked["data"]["slot"], Value::Null);

    let (status, released) = server.post_json("/api/slots/10/release", json!({})).await?;
    assert_eq!(status, 200);
    assert_eq!(released["data"]["released"], json!(true));

    let (_, released) = server.post_json("/api/slots/77/release", json!({})).await?;
    assert_eq!(released["data"]["released"], json!(false));

    let (status, missing) = server.get_json("/api/slots/77").await?;
    assert_eq!(status, 404);
    assert_eq!(missing["success"], json!(false));

    Ok(())
}

#[tokio::test]
async fn health_reports_lot_totals() -> Result<(), Box<dyn std::error::Error>> {
    let server = spawn_server().await?;
    server.post_form("/add", &[("slotNo", "1")]).await?;
    server.post_form("/add", &[("slotNo", "2")]).await?;
    server.post_form("/park", &[]).await?;

    let (status, health) = server.get_json("/health").await?;
    assert_eq!(status, 200);
    assert_eq!(health["data"]["status"], json!("ok"));
    assert_eq!(health["data"]["total"], json!(2));
    assert_eq!(health["data"]["free"], json!(1));

    Ok(())
}

#[tokio::test]
async fn storage_failure_renders_error_pages() -> Result<(), Box<dyn std::error::Error>> {
    let server = spawn_server().await?;
    sqlx::query("DROP TABLE parking_slots")
        .execute(server.parking.store().pool())
        .await?;

    let checks = [
        server.post_form("/park", &[("needsEV", "on")]).await?,
        server.post_form("/add", &[("slotNo", "1")]).await?,
        server.get_text("/").await?,
        server.get_text("/remove/1").await?,
    ];
    for (status, page) in checks {
        assert_eq!(status, 500);
        assert!(page.contains("<html>"));
        assert!(page.contains("Storage error."));
        assert!(!page.contains("no such table"), "database details leaked: {page}");
    }

    let (status, health) = server.get_json("/health").await?;
    assert_eq!(status, 503);
    assert_eq!(health["data"]["status"], json!("unhealthy"));

    Ok(())
}

#[tokio::test]
async fn remove_only_routes_non_negative_numbers() -> Result<(), Box<dyn std::error::Error>> {
    let server = spawn_server().await?;
    server.post_form("/add", &[("slotNo", "4")]).await?;
    server.post_form("/park", &[]).await?;

    for path in ["/remove/abc", "/remove/-4", "/remove/1.5"] {
        let (status, page) = server.get_text(path).await?;
        assert_eq!(status, 404, "{path}");
        assert!(page.contains("Page not found."));
    }

    let (_, slot4) = server.get_json("/api/slots/4").await?;
    assert_eq!(slot4["data"]["is_occupied"], json!(true));

    let resp = server.client.get(server.url("/remove/0")).send().await?;
    assert_eq!(resp.status().as_u16(), 303);

    Ok(())
}
