// ABOUTME: Test helper fixtures shared by the unit tests
// ABOUTME: A small mixed inventory of linodes and a domain with tags and IPs

#[cfg(test)]
use crate::item::SearchableItem;
#[cfg(test)]
use serde_json::json;

#[cfg(test)]
pub fn searchable_items() -> Vec<SearchableItem> {
    vec![
        SearchableItem::new(1, "test-linode-001", "linode")
            .with_data("tags", json!(["my-app"]))
            .with_data("ips", json!(["192.168.0.1", "2600:3c00::f03c:91ff:fe24:1"]))
            .with_data("region", "us-east"),
        SearchableItem::new(2, "test-linode-002", "linode")
            .with_data("tags", json!(["my-app2", "production"]))
            .with_data("ips", json!(["192.168.0.2"]))
            .with_data("region", "us-west"),
        SearchableItem::new(3, "test-linode-003", "linode")
            .with_data("tags", json!(["production", "unrelated-app"]))
            .with_data("ips", json!(["10.0.0.3"]))
            .with_data("region", "eu-central"),
        SearchableItem::new(4, "my-app-domain.com", "domain")
            .with_data("tags", json!(["web"]))
            .with_data("status", "active"),
    ]
}
