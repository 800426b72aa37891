//! Component registry domain logic for the lab inventory tracker.
//!
//! The registry is the authoritative record of each component's total and
//! available quantity. Capacity edits keep the on-loan count constant, and a
//! component can only be deleted once every unit is back on the shelf.

use log::{info, warn};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::commands::components::{AddComponentCommand, UpdateComponentCommand};
use crate::domain::errors::DomainError;
use crate::domain::models::component::Component;
use crate::storage::traits::{transact, InventoryStore};

/// Service for managing the component registry.
#[derive(Clone)]
pub struct ComponentService<S: InventoryStore> {
    store: Arc<S>,
}

impl<S: InventoryStore> ComponentService<S> {
    /// Create a new ComponentService
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Register a new component. Stock starts fully available.
    pub fn add_component(&self, cmd: AddComponentCommand) -> Result<Component, DomainError> {
        info!(
            "Adding component: name={}, category={}, total={}",
            cmd.name, cmd.category, cmd.total_quantity
        );

        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("component name cannot be empty"));
        }
        if cmd.category.trim().is_empty() {
            return Err(DomainError::validation("component category cannot be empty"));
        }

        let now_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(anyhow::Error::from)?
            .as_millis() as u64;

        let component = Component {
            id: Component::generate_id(now_millis),
            name: cmd.name.trim().to_string(),
            category: cmd.category.trim().to_string(),
            total_quantity: cmd.total_quantity,
            available_quantity: cmd.total_quantity,
            description: cmd
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        };

        let created = transact(self.store.as_ref(), |data| {
            data.components.push(component.clone());
            Ok::<_, DomainError>(component)
        })?;

        info!("Created component: {} with ID: {}", created.name, created.id);
        Ok(created)
    }

    /// Edit name, category, description or capacity of an existing component.
    ///
    /// A capacity change shifts `available_quantity` by the same delta, so
    /// the number of units currently out with students is unchanged by the
    /// edit itself.
    pub fn update_component(&self, cmd: UpdateComponentCommand) -> Result<Component, DomainError> {
        info!("Updating component: {}", cmd.component_id);

        transact(self.store.as_ref(), |data| {
            let component = data
                .components
                .iter_mut()
                .find(|c| c.id == cmd.component_id)
                .ok_or_else(|| {
                    DomainError::not_found(format!("component not found: {}", cmd.component_id))
                })?;

            if let Some(name) = &cmd.name {
                if name.trim().is_empty() {
                    return Err(DomainError::validation("component name cannot be empty"));
                }
                component.name = name.trim().to_string();
            }
            if let Some(category) = &cmd.category {
                if category.trim().is_empty() {
                    return Err(DomainError::validation(
                        "component category cannot be empty",
                    ));
                }
                component.category = category.trim().to_string();
            }
            if let Some(description) = &cmd.description {
                let description = description.trim();
                component.description = if description.is_empty() {
                    None
                } else {
                    Some(description.to_string())
                };
            }
            if let Some(new_total) = cmd.total_quantity {
                let in_use = component.in_use();
                if new_total < in_use {
                    return Err(DomainError::validation(format!(
                        "total quantity {} is below the {} units currently issued",
                        new_total, in_use
                    )));
                }
                component.total_quantity = new_total;
                component.available_quantity = new_total - in_use;
            }

            Ok(component.clone())
        })
    }

    /// Remove a component from the registry.
    ///
    /// Fails while any unit is still out on loan, so ledger history never
    /// points at stock that silently vanished mid-loan.
    pub fn delete_component(&self, component_id: &str) -> Result<(), DomainError> {
        info!("Deleting component: {}", component_id);

        transact(self.store.as_ref(), |data| {
            let component = data
                .components
                .iter()
                .find(|c| c.id == component_id)
                .ok_or_else(|| {
                    DomainError::not_found(format!("component not found: {}", component_id))
                })?;

            if component.available_quantity != component.total_quantity {
                warn!(
                    "Refusing to delete {}: {} of {} units still issued",
                    component_id,
                    component.in_use(),
                    component.total_quantity
                );
                return Err(DomainError::conflict("component currently issued"));
            }

            data.components.retain(|c| c.id != component_id);
            Ok(())
        })
    }

    /// Read-only snapshot of the registry.
    pub fn get_components(&self) -> Result<Vec<Component>, DomainError> {
        Ok(self.store.load()?.components)
    }

    /// Look up a single component by ID.
    pub fn get_component(&self, component_id: &str) -> Result<Option<Component>, DomainError> {
        let component = self
            .store
            .load()?
            .components
            .into_iter()
            .find(|c| c.id == component_id);

        if component.is_none() {
            warn!("Component not found: {}", component_id);
        }

        Ok(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::{JsonConnection, JsonInventoryStore};

    fn create_test_service() -> (ComponentService<JsonInventoryStore>, tempfile::TempDir) {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        let store = Arc::new(JsonInventoryStore::new(connection));
        (ComponentService::new(store), temp_dir)
    }

    fn add_cmd(name: &str, total: u32) -> AddComponentCommand {
        AddComponentCommand {
            name: name.to_string(),
            category: "Sensor".to_string(),
            total_quantity: total,
            description: None,
        }
    }

    #[test]
    fn test_add_component_starts_fully_available() {
        let (service, _temp_dir) = create_test_service();

        let component = service.add_component(add_cmd("Ultrasonic Sensor", 12)).unwrap();

        assert!(component.id.starts_with("comp-"));
        assert_eq!(component.total_quantity, 12);
        assert_eq!(component.available_quantity, 12);
        assert_eq!(service.get_components().unwrap().len(), 1);
    }

    #[test]
    fn test_add_component_rejects_empty_name() {
        let (service, _temp_dir) = create_test_service();

        let err = service.add_component(add_cmd("   ", 3)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(service.get_components().unwrap().is_empty());
    }

    #[test]
    fn test_add_component_rejects_empty_category() {
        let (service, _temp_dir) = create_test_service();

        let cmd = AddComponentCommand {
            name: "Servo Motor".to_string(),
            category: "".to_string(),
            total_quantity: 3,
            description: None,
        };
        let err = service.add_component(cmd).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_update_component_patches_fields() {
        let (service, _temp_dir) = create_test_service();
        let component = service.add_component(add_cmd("Ardino Uno", 5)).unwrap();

        let updated = service
            .update_component(UpdateComponentCommand {
                component_id: component.id.clone(),
                name: Some("Arduino Uno".to_string()),
                description: Some("Rev 3 boards".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.name, "Arduino Uno");
        assert_eq!(updated.category, "Sensor");
        assert_eq!(updated.description.as_deref(), Some("Rev 3 boards"));
        assert_eq!(updated.total_quantity, 5);
    }

    #[test]
    fn test_update_capacity_keeps_in_use_constant() {
        let (service, _temp_dir) = create_test_service();
        let component = service.add_component(add_cmd("Arduino Uno", 10)).unwrap();

        // Simulate 6 units out on loan by editing the stored snapshot the way
        // the issue service does.
        let store = service.store.clone();
        transact(store.as_ref(), |data| {
            data.components[0].available_quantity = 4;
            Ok::<_, DomainError>(())
        })
        .unwrap();

        let updated = service
            .update_component(UpdateComponentCommand {
                component_id: component.id.clone(),
                total_quantity: Some(15),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.total_quantity, 15);
        assert_eq!(updated.available_quantity, 9);
        assert_eq!(updated.in_use(), 6);
    }

    #[test]
    fn test_update_capacity_below_in_use_fails() {
        let (service, _temp_dir) = create_test_service();
        let component = service.add_component(add_cmd("Arduino Uno", 10)).unwrap();

        let store = service.store.clone();
        transact(store.as_ref(), |data| {
            data.components[0].available_quantity = 4;
            Ok::<_, DomainError>(())
        })
        .unwrap();

        let err = service
            .update_component(UpdateComponentCommand {
                component_id: component.id.clone(),
                total_quantity: Some(5),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // Nothing committed
        let unchanged = service.get_component(&component.id).unwrap().unwrap();
        assert_eq!(unchanged.total_quantity, 10);
        assert_eq!(unchanged.available_quantity, 4);
    }

    #[test]
    fn test_update_unknown_component_fails() {
        let (service, _temp_dir) = create_test_service();

        let err = service
            .update_component(UpdateComponentCommand {
                component_id: "comp-0-none".to_string(),
                name: Some("Anything".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn test_delete_component_with_outstanding_loans_fails() {
        let (service, _temp_dir) = create_test_service();
        let component = service.add_component(add_cmd("Arduino Uno", 10)).unwrap();

        let store = service.store.clone();
        transact(store.as_ref(), |data| {
            data.components[0].available_quantity = 7;
            Ok::<_, DomainError>(())
        })
        .unwrap();

        let err = service.delete_component(&component.id).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(service.get_components().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_fully_stocked_component_succeeds() {
        let (service, _temp_dir) = create_test_service();
        let component = service.add_component(add_cmd("Arduino Uno", 10)).unwrap();

        service.delete_component(&component.id).unwrap();

        assert!(service.get_components().unwrap().is_empty());
        assert!(service.get_component(&component.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_unknown_component_fails() {
        let (service, _temp_dir) = create_test_service();

        let err = service.delete_component("comp-0-none").unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
