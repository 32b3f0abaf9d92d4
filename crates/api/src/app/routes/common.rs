//! Shared response-header helpers for the resource routes.

use axum::http::header::{HeaderMap, HeaderValue, LINK, LOCATION};

use tenderi_store::Page;

/// Application token used as the prefix of the alert headers.
pub const APPLICATION_NAME: &str = "tenderi";

/// `X-Total-Count` plus RFC 5988 page links, built from the request path.
pub fn pagination_headers<T>(path: &str, page: &Page<T>) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if let Ok(total) = HeaderValue::from_str(&page.total.to_string()) {
        headers.insert("x-total-count", total);
    }

    let pageable = &page.pageable;
    let current = pageable.page;
    let last = page.total_pages().saturating_sub(1) as u32;

    let mut links = Vec::new();
    if page.has_more() {
        links.push(page_link(path, current + 1, pageable.size, "next"));
    }
    if current > 0 {
        links.push(page_link(path, current - 1, pageable.size, "prev"));
    }
    links.push(page_link(path, last, pageable.size, "last"));
    links.push(page_link(path, 0, pageable.size, "first"));

    if let Ok(link) = HeaderValue::from_str(&links.join(",")) {
        headers.insert(LINK, link);
    }

    headers
}

fn page_link(path: &str, page: u32, size: u32, rel: &str) -> String {
    format!("<{path}?page={page}&size={size}>; rel=\"{rel}\"")
}

/// Alert headers consumed by clients to toast mutation outcomes.
pub fn creation_alert(entity: &str, id: i64) -> HeaderMap {
    let mut headers = alert(entity, id, "created");
    if let Ok(location) = HeaderValue::from_str(&format!("/api/{entity}s/{id}")) {
        headers.insert(LOCATION, location);
    }
    headers
}

pub fn update_alert(entity: &str, id: i64) -> HeaderMap {
    alert(entity, id, "updated")
}

pub fn deletion_alert(entity: &str, id: i64) -> HeaderMap {
    alert(entity, id, "deleted")
}

fn alert(entity: &str, id: i64, action: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let message = format!("{APPLICATION_NAME}.{entity}.{action}");
    if let Ok(value) = HeaderValue::from_str(&message) {
        headers.insert("x-tenderi-alert", value);
    }
    if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
        headers.insert("x-tenderi-params", value);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenderi_store::Pageable;

    fn page(total: u64, page_index: u32, size: u32) -> Page<()> {
        Page {
            items: Vec::new(),
            total,
            pageable: Pageable {
                page: page_index,
                size,
                sort: Vec::new(),
            },
        }
    }

    #[test]
    fn total_count_header_is_set() {
        let headers = pagination_headers("/api/ponudes", &page(5, 0, 2));
        assert_eq!(headers.get("x-total-count").unwrap(), "5");
    }

    #[test]
    fn middle_page_links_both_ways() {
        let headers = pagination_headers("/api/ponudes", &page(5, 1, 2));
        let link = headers.get(LINK).unwrap().to_str().unwrap();
        assert!(link.contains("page=2&size=2>; rel=\"next\""));
        assert!(link.contains("page=0&size=2>; rel=\"prev\""));
        assert!(link.contains("rel=\"last\""));
        assert!(link.contains("rel=\"first\""));
    }

    #[test]
    fn last_page_has_no_next_link() {
        let headers = pagination_headers("/api/ponudes", &page(5, 2, 2));
        let link = headers.get(LINK).unwrap().to_str().unwrap();
        assert!(!link.contains("rel=\"next\""));
    }

    #[test]
    fn creation_alert_carries_location() {
        let headers = creation_alert("ponude", 7);
        assert_eq!(headers.get(LOCATION).unwrap(), "/api/ponudes/7");
        assert_eq!(headers.get("x-tenderi-alert").unwrap(), "tenderi.ponude.created");
        assert_eq!(headers.get("x-tenderi-params").unwrap(), "7");
    }
}
