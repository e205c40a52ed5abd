// ABOUTME: This module handles output formatting for search results
// ABOUTME: It provides table (with color support), JSON, and YAML formatters

use anyhow::Result;
use cloud_search::{EntityType, SearchResults, SearchableItem};
use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::constants::ui;

pub trait OutputFormat {
    fn format_results(&self, results: &SearchResults<'_>) -> Result<String>;
}

pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn truncate(text: &str, max_len: usize) -> String {
        if text.chars().count() <= max_len {
            text.to_string()
        } else {
            let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
            format!("{}...", kept)
        }
    }

    fn format_type(&self, entity_type: &EntityType) -> String {
        let name = entity_type.as_str();
        if !self.use_color {
            return name.to_string();
        }

        match entity_type {
            EntityType::Linode => name.green().to_string(),
            EntityType::Volume | EntityType::Bucket => name.blue().to_string(),
            EntityType::Domain => name.cyan().to_string(),
            EntityType::Image => name.magenta().to_string(),
            EntityType::NodeBalancer | EntityType::Firewall => name.yellow().to_string(),
            EntityType::KubernetesCluster | EntityType::Database => name.bright_blue().to_string(),
            EntityType::Unknown(_) => name.dimmed().to_string(),
        }
    }

    fn format_list(&self, values: &[&str]) -> String {
        if values.is_empty() {
            return if self.use_color {
                "-".dimmed().to_string()
            } else {
                "-".to_string()
            };
        }
        Self::truncate(&values.join(", "), ui::MAX_LIST_WIDTH)
    }

    fn row(&self, item: &SearchableItem) -> TableRow {
        TableRow {
            entity_type: self.format_type(&item.entity_type),
            id: item.value.to_string(),
            label: Self::truncate(&item.label, ui::MAX_LABEL_WIDTH),
            tags: self.format_list(&item.tags()),
            ips: self.format_list(&item.ips()),
        }
    }
}

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Type")]
    entity_type: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "IPs")]
    ips: String,
}

impl OutputFormat for TableFormatter {
    fn format_results(&self, results: &SearchResults<'_>) -> Result<String> {
        let rows: Vec<TableRow> = results.items().map(|item| self.row(item)).collect();

        let mut table = Table::new(rows);
        table.with(Style::psql());
        Ok(table.to_string())
    }
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormat for JsonFormatter {
    fn format_results(&self, results: &SearchResults<'_>) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(results)?)
        } else {
            Ok(serde_json::to_string(results)?)
        }
    }
}

pub struct YamlFormatter;

impl OutputFormat for YamlFormatter {
    fn format_results(&self, results: &SearchResults<'_>) -> Result<String> {
        Ok(serde_yaml::to_string(results)?)
    }
}
