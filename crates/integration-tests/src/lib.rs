//! Integration tests for Marigold.
//!
//! These tests exercise the admin and storefront crates together: a
//! merchant shapes the store through `StoreService`, a visitor browses and
//! checks out through `StorefrontSession`, and persistence round-trips
//! through the snapshot slot. Everything runs in-process; the only socket
//! ever opened is a loopback stub standing in for the copywriter API.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p marigold-integration-tests
//! ```

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Once;
use std::thread;

use marigold_admin::models::{NewCatalog, NewProduct};
use marigold_admin::storage::MemoryStore;
use marigold_admin::store::StoreService;
use marigold_core::{CatalogId, CategoryId, LocationId, Price, ProductId};

/// Initialize tracing once for the whole test binary. Honors `RUST_LOG`;
/// silent by default.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// IDs of the entities seeded by [`seed_store`].
pub struct SeededStore {
    pub service: StoreService,
    pub stationery: CategoryId,
    pub kitchen: CategoryId,
    pub back_room: LocationId,
    pub pen: ProductId,
    pub notebook: ProductId,
    pub mug: ProductId,
    pub summer_picks: CatalogId,
}

/// A small store with two categories, one location, three products, and a
/// curated catalog, built through the same operations the admin UI uses.
pub fn seed_store() -> SeededStore {
    let mut service =
        StoreService::open(Box::new(MemoryStore::new()), "Test Bazaar").expect("open store");

    let stationery = service
        .add_category("Stationery", None)
        .expect("add category");
    let kitchen = service.add_category("Kitchen", None).expect("add category");
    let back_room = service.add_location("Back room").expect("add location");

    let pen = service
        .add_product(NewProduct {
            name: "Pen".to_string(),
            description: "Smooth blue ink".to_string(),
            price: Price::from_cents(300),
            category_id: Some(stationery),
            location_id: Some(back_room),
            images: vec![
                "pen-front.jpg".to_string(),
                "pen-side.jpg".to_string(),
                "pen-cap.jpg".to_string(),
            ],
            promo_tag: None,
        })
        .expect("add pen");

    let notebook = service
        .add_product(NewProduct {
            name: "Notebook".to_string(),
            description: "A5, dotted".to_string(),
            price: Price::from_cents(1250),
            category_id: Some(stationery),
            location_id: None,
            images: vec!["notebook.jpg".to_string()],
            promo_tag: None,
        })
        .expect("add notebook");

    let mug = service
        .add_product(NewProduct {
            name: "Mug".to_string(),
            description: "Stoneware, 300 ml".to_string(),
            price: Price::from_cents(900),
            category_id: Some(kitchen),
            location_id: Some(back_room),
            images: Vec::new(),
            promo_tag: None,
        })
        .expect("add mug");

    let summer_picks = service
        .create_catalog(NewCatalog {
            name: "Summer Picks".to_string(),
            description: "Bright things for bright days".to_string(),
            product_ids: vec![pen, mug],
        })
        .expect("create catalog");

    SeededStore {
        service,
        stationery,
        kitchen,
        back_room,
        pen,
        notebook,
        mug,
        summer_picks,
    }
}

/// Serve exactly one HTTP response on a loopback port, then stop.
///
/// Stands in for the copywriter API. Returns the base URL to point the
/// client at; the background thread exits after the first request.
pub fn one_shot_http(status_line: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");

    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };

        // Drain the request: headers, then content-length body bytes.
        let mut raw = Vec::new();
        let mut buf = [0_u8; 1024];
        let header_end = loop {
            match stream.read(&mut buf) {
                Ok(0) => return,
                Ok(n) => {
                    raw.extend_from_slice(buf.get(..n).unwrap_or_default());
                    if let Some(pos) = find_header_end(&raw) {
                        break pos;
                    }
                }
                Err(_) => return,
            }
        };
        let content_length = parse_content_length(&raw).unwrap_or(0);
        let mut body_read = raw.len().saturating_sub(header_end);
        while body_read < content_length {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => body_read += n,
            }
        }

        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.write_all(response.as_bytes());
    });

    format!("http://{addr}/")
}

fn find_header_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|pos| pos + 4)
}

fn parse_content_length(raw: &[u8]) -> Option<usize> {
    let text = String::from_utf8_lossy(raw);
    text.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.eq_ignore_ascii_case("content-length") {
            value.trim().parse().ok()
        } else {
            None
        }
    })
}
