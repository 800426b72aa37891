//! Export service domain logic for the lab inventory tracker.
//!
//! This module contains all business logic related to exporting inventory
//! and ledger data as CSV files, including orchestration of snapshot
//! retrieval and file operations. The export side consumes read-only
//! snapshots and never mutates the store; every field it sees is already
//! validated by the services that wrote it.

use anyhow::Result;
use chrono::Utc;
use log::{error, info};
use std::fs;

use shared::{
    ExportDataResponse, ExportReport, ExportToPathRequest, ExportToPathResponse, IssueStatus,
};

use crate::domain::component_service::ComponentService;
use crate::domain::issue_service::IssueService;
use crate::domain::models::component::Component as DomainComponent;
use crate::domain::models::issue::ComponentIssue as DomainComponentIssue;
use crate::storage::traits::InventoryStore;

struct ComponentMapper;

impl ComponentMapper {
    pub fn to_dto(component: DomainComponent) -> shared::Component {
        shared::Component {
            in_use: component.in_use(),
            id: component.id,
            name: component.name,
            category: component.category,
            total_quantity: component.total_quantity,
            available_quantity: component.available_quantity,
            description: component.description,
        }
    }
}

struct IssueMapper;

impl IssueMapper {
    pub fn to_dto(issue: DomainComponentIssue) -> shared::ComponentIssue {
        shared::ComponentIssue {
            id: issue.id,
            student_name: issue.student_name,
            roll_no: issue.roll_no,
            mobile: issue.mobile,
            component_id: issue.component_id,
            component_name: issue.component_name,
            quantity: issue.quantity,
            issue_date: issue.issue_date.to_rfc3339(),
            due_date: issue.due_date.format("%Y-%m-%d").to_string(),
            status: match issue.status {
                crate::domain::models::issue::IssueStatus::Issued => IssueStatus::Issued,
                crate::domain::models::issue::IssueStatus::Returned => IssueStatus::Returned,
            },
            return_date: issue.return_date.map(|d| d.to_rfc3339()),
            purpose: issue.purpose,
            issued_by: issue.issued_by,
        }
    }
}

/// Export service that handles all export-related business logic
#[derive(Clone)]
pub struct ExportService {
    // No internal state needed for now
}

impl ExportService {
    /// Create a new ExportService instance
    pub fn new() -> Self {
        Self {}
    }

    /// Export the issue ledger as CSV, oldest issue first.
    pub fn export_issues_csv<S: InventoryStore>(
        &self,
        issue_service: &IssueService<S>,
    ) -> Result<ExportDataResponse> {
        info!("Exporting issue ledger as CSV");

        let mut issues = issue_service.get_component_issues()?;
        // Ledger reads newest-first; reports read better chronological
        issues.reverse();
        let issues: Vec<shared::ComponentIssue> =
            issues.into_iter().map(IssueMapper::to_dto).collect();

        let mut writer = csv::Writer::from_writer(vec![]);
        writer.write_record([
            "Student Name",
            "Roll Number",
            "Mobile",
            "Component",
            "Quantity",
            "Issue Date",
            "Due Date",
            "Status",
            "Return Date",
            "Purpose",
        ])?;
        for issue in &issues {
            writer.write_record(&[
                &issue.student_name,
                &issue.roll_no,
                &issue.mobile,
                &issue.component_name,
                &issue.quantity.to_string(),
                &issue.issue_date,
                &issue.due_date,
                &issue.status.to_string(),
                &issue.return_date.clone().unwrap_or_default(),
                &issue.purpose,
            ])?;
        }
        let csv_content = String::from_utf8(
            writer
                .into_inner()
                .map_err(|e| anyhow::anyhow!("failed to flush csv writer: {}", e))?,
        )?;

        let filename = format!("issued-components-{}.csv", Utc::now().format("%Y-%m-%d"));
        let response = ExportDataResponse {
            row_count: issues.len(),
            csv_content,
            filename,
        };

        info!(
            "Exported {} ledger rows ({} bytes) as {}",
            response.row_count,
            response.csv_content.len(),
            response.filename
        );
        Ok(response)
    }

    /// Export the component registry as CSV.
    pub fn export_inventory_csv<S: InventoryStore>(
        &self,
        component_service: &ComponentService<S>,
    ) -> Result<ExportDataResponse> {
        info!("Exporting component registry as CSV");

        let components: Vec<shared::Component> = component_service
            .get_components()?
            .into_iter()
            .map(ComponentMapper::to_dto)
            .collect();

        let mut writer = csv::Writer::from_writer(vec![]);
        writer.write_record([
            "Component ID",
            "Name",
            "Category",
            "Total Quantity",
            "Available Quantity",
            "In Use",
            "Description",
        ])?;
        for component in &components {
            writer.write_record(&[
                &component.id,
                &component.name,
                &component.category,
                &component.total_quantity.to_string(),
                &component.available_quantity.to_string(),
                &component.in_use.to_string(),
                &component.description.clone().unwrap_or_default(),
            ])?;
        }
        let csv_content = String::from_utf8(
            writer
                .into_inner()
                .map_err(|e| anyhow::anyhow!("failed to flush csv writer: {}", e))?,
        )?;

        let filename = format!("inventory-{}.csv", Utc::now().format("%Y-%m-%d"));
        let response = ExportDataResponse {
            row_count: components.len(),
            csv_content,
            filename,
        };

        info!(
            "Exported {} registry rows ({} bytes) as {}",
            response.row_count,
            response.csv_content.len(),
            response.filename
        );
        Ok(response)
    }

    /// Export a report directly to a specified path (or the default
    /// location) with complete orchestration.
    pub fn export_to_path<S: InventoryStore>(
        &self,
        request: ExportToPathRequest,
        component_service: &ComponentService<S>,
        issue_service: &IssueService<S>,
    ) -> Result<ExportToPathResponse> {
        info!(
            "Exporting {:?} to path - custom_path: {:?}",
            request.report, request.custom_path
        );

        let export_response = match request.report {
            ExportReport::Inventory => self.export_inventory_csv(component_service)?,
            ExportReport::IssuedComponents => self.export_issues_csv(issue_service)?,
        };

        // Determine the export directory
        let export_dir = match request.custom_path {
            Some(custom_path) if !custom_path.trim().is_empty() => {
                std::path::PathBuf::from(self.sanitize_path(&custom_path))
            }
            _ => match dirs::document_dir().or_else(dirs::home_dir) {
                Some(dir) => dir,
                None => {
                    error!("Could not determine default export directory");
                    return Ok(ExportToPathResponse {
                        success: false,
                        message: "Failed to determine export directory".to_string(),
                        file_path: String::new(),
                        row_count: 0,
                    });
                }
            },
        };

        let file_path = export_dir.join(&export_response.filename);

        if let Err(e) = fs::create_dir_all(&export_dir) {
            error!("Failed to create export directory {:?}: {}", export_dir, e);
            return Ok(ExportToPathResponse {
                success: false,
                message: format!("Failed to create export directory: {}", e),
                file_path: export_dir.to_string_lossy().to_string(),
                row_count: 0,
            });
        }

        match fs::write(&file_path, &export_response.csv_content) {
            Ok(_) => {
                let file_path = file_path.to_string_lossy().to_string();
                info!(
                    "Exported {} rows to: {}",
                    export_response.row_count, file_path
                );
                Ok(ExportToPathResponse {
                    success: true,
                    message: format!("File exported successfully to: {}", file_path),
                    file_path,
                    row_count: export_response.row_count,
                })
            }
            Err(e) => {
                error!("Failed to write export file to {:?}: {}", file_path, e);
                Ok(ExportToPathResponse {
                    success: false,
                    message: format!("Failed to write export file: {}", e),
                    file_path: file_path.to_string_lossy().to_string(),
                    row_count: 0,
                })
            }
        }
    }

    /// Basic path sanitization to handle common user input issues
    fn sanitize_path(&self, path: &str) -> String {
        let mut cleaned = path.trim().to_string();

        // Remove surrounding quotes (single or double)
        if (cleaned.starts_with('"') && cleaned.ends_with('"'))
            || (cleaned.starts_with('\'') && cleaned.ends_with('\''))
        {
            cleaned = cleaned[1..cleaned.len() - 1].to_string();
        }

        cleaned = cleaned.trim().to_string();

        // Handle escaped spaces (common on some systems)
        cleaned = cleaned.replace("\\ ", " ");

        // Remove any trailing slashes/backslashes
        while cleaned.ends_with('/') || cleaned.ends_with('\\') {
            cleaned.pop();
        }

        // Handle tilde expansion for home directory
        if cleaned.starts_with('~') {
            if let Some(home) = dirs::home_dir() {
                if cleaned == "~" {
                    cleaned = home.to_string_lossy().to_string();
                } else if cleaned.starts_with("~/") || cleaned.starts_with("~\\") {
                    cleaned = home.join(&cleaned[2..]).to_string_lossy().to_string();
                }
            }
        }

        cleaned
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::components::AddComponentCommand;
    use crate::domain::commands::issues::IssueComponentCommand;
    use crate::storage::json::{JsonConnection, JsonInventoryStore};
    use chrono::Duration;
    use std::sync::Arc;

    fn create_test_services() -> (
        ComponentService<JsonInventoryStore>,
        IssueService<JsonInventoryStore>,
        tempfile::TempDir,
    ) {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        let store = Arc::new(JsonInventoryStore::new(connection));
        (
            ComponentService::new(store.clone()),
            IssueService::new(store),
            temp_dir,
        )
    }

    fn seed(
        components: &ComponentService<JsonInventoryStore>,
        issues: &IssueService<JsonInventoryStore>,
    ) {
        let component = components
            .add_component(AddComponentCommand {
                name: "Arduino Uno".to_string(),
                category: "Microcontroller".to_string(),
                total_quantity: 10,
                description: Some("Rev 3".to_string()),
            })
            .unwrap();
        issues
            .issue_component(IssueComponentCommand {
                student_name: "Priya Sharma".to_string(),
                roll_no: "21EC042".to_string(),
                mobile: "9876543210".to_string(),
                component_id: component.id,
                quantity: 2,
                due_date: Utc::now().date_naive() + Duration::days(7),
                purpose: "Line follower, v2".to_string(),
                issued_by: "Staff".to_string(),
            })
            .unwrap();
    }

    #[test]
    fn test_export_issues_csv_columns_and_quoting() {
        let (components, issues, _temp_dir) = create_test_services();
        seed(&components, &issues);

        let response = ExportService::new().export_issues_csv(&issues).unwrap();

        assert_eq!(response.row_count, 1);
        assert!(response.filename.starts_with("issued-components-"));
        let mut lines = response.csv_content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Student Name,Roll Number,Mobile,Component,Quantity,Issue Date,Due Date,Status,Return Date,Purpose"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("Priya Sharma,21EC042,9876543210,Arduino Uno,2,"));
        assert!(row.contains(",issued,"));
        // Field with a comma must come out quoted
        assert!(row.ends_with("\"Line follower, v2\""));
    }

    #[test]
    fn test_export_inventory_csv_includes_in_use() {
        let (components, issues, _temp_dir) = create_test_services();
        seed(&components, &issues);

        let response = ExportService::new()
            .export_inventory_csv(&components)
            .unwrap();

        assert_eq!(response.row_count, 1);
        assert!(response.filename.starts_with("inventory-"));
        let mut lines = response.csv_content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Component ID,Name,Category,Total Quantity,Available Quantity,In Use,Description"
        );
        let row = lines.next().unwrap();
        assert!(row.contains("Arduino Uno,Microcontroller,10,8,2,Rev 3"));
    }

    #[test]
    fn test_export_to_path_writes_file() {
        let (components, issues, temp_dir) = create_test_services();
        seed(&components, &issues);

        let target = temp_dir.path().join("reports");
        let response = ExportService::new()
            .export_to_path(
                ExportToPathRequest {
                    report: ExportReport::Inventory,
                    custom_path: Some(target.to_string_lossy().to_string()),
                },
                &components,
                &issues,
            )
            .unwrap();

        assert!(response.success, "{}", response.message);
        assert_eq!(response.row_count, 1);
        let written = fs::read_to_string(&response.file_path).unwrap();
        assert!(written.contains("Arduino Uno"));
    }

    #[test]
    fn test_sanitize_path() {
        let service = ExportService::new();

        // Quote removal and whitespace
        assert_eq!(service.sanitize_path("  /path/to/dir  "), "/path/to/dir");
        assert_eq!(service.sanitize_path("\"/path/to/dir\""), "/path/to/dir");
        assert_eq!(service.sanitize_path("'/path/to/dir'"), "/path/to/dir");

        // Escaped spaces and trailing slashes
        assert_eq!(service.sanitize_path("/path\\ to\\ dir"), "/path to dir");
        assert_eq!(service.sanitize_path("/path/to/dir/"), "/path/to/dir");

        // Tilde expansion
        if let Some(home) = dirs::home_dir() {
            let expected = home.join("exports").to_string_lossy().to_string();
            assert_eq!(service.sanitize_path("~/exports"), expected);
        }
    }
}
