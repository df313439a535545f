//! The authoritative in-memory area/employee state.
//!
//! [`AreaStore`] owns the [`AreaCollection`] for a session. Every mutation
//! validates its input, applies the change, saves a full snapshot through the
//! [`AreaRepository`] and publishes a status message on the [`Notifier`].
//! A rejected mutation leaves the collection untouched and publishes the
//! error message instead.

mod edit;

pub use edit::{EmployeeEdit, EmployeeField};

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{Area, AreaCollection, Employee, EmployeeId, checked_sum};
use crate::notification::Notifier;
use crate::persistence::{AreaRepository, KeyValueStore};
use crate::validation::{validate_hours, validate_name, validate_new_hours, validate_percentage};

/// Owns the area collection and applies validated mutations to it.
///
/// # Example
///
/// ```
/// use tip_split::notification::Notifier;
/// use tip_split::persistence::{AreaRepository, MemoryKeyValueStore};
/// use tip_split::store::AreaStore;
///
/// let repository = AreaRepository::new(MemoryKeyValueStore::new());
/// let mut store = AreaStore::open(repository, Notifier::default());
///
/// store.add_area("Bar", 60.0)?;
/// store.add_employee("Bar", "Ana", 6.0)?;
/// assert_eq!(store.areas().area("Bar").unwrap().employees.len(), 1);
/// # Ok::<(), tip_split::error::EngineError>(())
/// ```
#[derive(Debug)]
pub struct AreaStore<S> {
    areas: AreaCollection,
    repository: AreaRepository<S>,
    notifier: Notifier,
}

impl<S: KeyValueStore> AreaStore<S> {
    /// Opens a store with whatever snapshot the repository holds.
    pub fn open(repository: AreaRepository<S>, notifier: Notifier) -> Self {
        let areas = repository.load();
        Self {
            areas,
            repository,
            notifier,
        }
    }

    /// The current collection.
    pub fn areas(&self) -> &AreaCollection {
        &self.areas
    }

    /// The notification channel this store reports to.
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// The repository snapshots are saved through.
    pub fn repository(&self) -> &AreaRepository<S> {
        &self.repository
    }

    /// Adds an area holding `percentage` of the pool.
    ///
    /// Fails with a validation error for a blank name or a percentage that is
    /// not a positive number, with [`EngineError::DuplicateName`] if the name
    /// is taken, and with [`EngineError::BudgetExceeded`] if the total would
    /// pass 100.
    pub fn add_area(&mut self, name: &str, percentage: f64) -> EngineResult<()> {
        self.apply("Area added successfully.", |areas| {
            let name = validate_name("area name", name)?;
            let percentage = validate_percentage(percentage)?;

            if areas.contains(&name) {
                return Err(EngineError::DuplicateName {
                    kind: "Area".to_string(),
                    name,
                });
            }

            let available = areas.remaining_percentage()?;
            if percentage > available {
                return Err(EngineError::BudgetExceeded {
                    requested: percentage,
                    available,
                });
            }

            areas.insert(name, Area::new(percentage));
            Ok(())
        })
    }

    /// Removes an area and all of its employees.
    ///
    /// Removing an unknown area is a successful no-op that neither saves nor
    /// notifies; the return value says whether anything was removed.
    pub fn remove_area(&mut self, name: &str) -> EngineResult<bool> {
        let name = name.trim();
        if !self.areas.contains(name) {
            info!(area = %name, "No such area to remove");
            return Ok(false);
        }

        self.apply("Area removed successfully.", |areas| {
            Ok(areas.remove(name).is_some())
        })
    }

    /// Appends an employee with no tips to an area and returns its id.
    ///
    /// Fails with a validation error for a blank area or employee name, or
    /// for hours that are not a positive number; with
    /// [`EngineError::AreaNotFound`] for an unknown area; and with
    /// [`EngineError::DuplicateName`] if the area already has an employee
    /// with that exact name.
    pub fn add_employee(
        &mut self,
        area_name: &str,
        name: &str,
        hours: f64,
    ) -> EngineResult<EmployeeId> {
        self.apply("Employee added successfully.", |areas| {
            let area_name = validate_name("area", area_name)?;
            let name = validate_name("employee name", name)?;
            let hours = validate_new_hours(hours)?;

            let area = areas
                .area_mut(&area_name)
                .ok_or_else(|| EngineError::area_not_found(&area_name))?;
            if area.employee_named(&name).is_some() {
                return Err(duplicate_employee(name));
            }
            ensure_hours_fit(area, None, hours)?;

            let employee = Employee::new(name, hours);
            let id = employee.id;
            area.employees.push(employee);
            Ok(id)
        })
    }

    /// Edits the employee at `index` in an area.
    ///
    /// `field` is `"name"` or `"hours"` (`"nombre"` / `"horas"` also work);
    /// any other field is ignored without error and `Ok(false)` is returned.
    /// Hours must parse as a non-negative number.
    pub fn edit_employee(
        &mut self,
        area_name: &str,
        index: usize,
        field: &str,
        value: &str,
    ) -> EngineResult<bool> {
        let Some(field) = EmployeeField::parse(field) else {
            info!(area = %area_name, index, field = %field, "Ignoring edit of unsupported field");
            return Ok(false);
        };

        self.apply("Employee updated successfully.", |areas| {
            let id = employee_at(areas, area_name, index)?;
            let edit = EmployeeEdit::parse(field, value)?;
            apply_edit(areas, area_name, id, edit)?;
            Ok(true)
        })
    }

    /// Edits an employee addressed by id.
    pub fn edit_employee_by_id(
        &mut self,
        area_name: &str,
        id: EmployeeId,
        edit: EmployeeEdit,
    ) -> EngineResult<()> {
        self.apply("Employee updated successfully.", |areas| {
            apply_edit(areas, area_name, id, edit)
        })
    }

    /// Removes the employee at `index` in an area and returns it.
    pub fn remove_employee(&mut self, area_name: &str, index: usize) -> EngineResult<Employee> {
        self.apply("Employee removed successfully.", |areas| {
            let id = employee_at(areas, area_name, index)?;
            take_employee(areas, area_name, id)
        })
    }

    /// Removes an employee addressed by id and returns it.
    pub fn remove_employee_by_id(
        &mut self,
        area_name: &str,
        id: EmployeeId,
    ) -> EngineResult<Employee> {
        self.apply("Employee removed successfully.", |areas| {
            take_employee(areas, area_name, id)
        })
    }

    /// Installs `areas` as the new state, e.g. the result of a distribution.
    pub fn replace(&mut self, areas: AreaCollection) {
        self.replace_with_message(areas, "Areas updated successfully.");
    }

    pub(crate) fn replace_with_message(&mut self, areas: AreaCollection, message: &str) {
        self.areas = areas;
        self.commit(message);
    }

    fn apply<T>(
        &mut self,
        success: &str,
        operation: impl FnOnce(&mut AreaCollection) -> EngineResult<T>,
    ) -> EngineResult<T> {
        match operation(&mut self.areas) {
            Ok(value) => {
                self.commit(success);
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, "Store operation rejected");
                self.notifier.error(err.to_string());
                Err(err)
            }
        }
    }

    fn commit(&mut self, message: &str) {
        self.repository.save(&self.areas);
        info!(
            areas = self.areas.len(),
            employees = self.areas.employee_count(),
            total_percentage = ?self.areas.total_percentage().ok(),
            "{}",
            message
        );
        self.notifier.success(message);
    }
}

fn duplicate_employee(name: String) -> EngineError {
    EngineError::DuplicateName {
        kind: "Employee".to_string(),
        name,
    }
}

fn area_mut<'a>(areas: &'a mut AreaCollection, area_name: &str) -> EngineResult<&'a mut Area> {
    let area_name = area_name.trim();
    areas
        .area_mut(area_name)
        .ok_or_else(|| EngineError::area_not_found(area_name))
}

fn employee_at(areas: &AreaCollection, area_name: &str, index: usize) -> EngineResult<EmployeeId> {
    let area_name = area_name.trim();
    let area = areas
        .area(area_name)
        .ok_or_else(|| EngineError::area_not_found(area_name))?;
    area.employees
        .get(index)
        .map(|e| e.id)
        .ok_or_else(|| EngineError::IndexOutOfRange {
            area: area_name.to_string(),
            index,
            len: area.employees.len(),
        })
}

fn position_of(area: &Area, area_name: &str, id: EmployeeId) -> EngineResult<usize> {
    area.position(id).ok_or_else(|| EngineError::EmployeeNotFound {
        area: area_name.trim().to_string(),
        id: id.to_string(),
    })
}

fn apply_edit(
    areas: &mut AreaCollection,
    area_name: &str,
    id: EmployeeId,
    edit: EmployeeEdit,
) -> EngineResult<()> {
    let area = area_mut(areas, area_name)?;
    let position = position_of(area, area_name, id)?;

    match edit {
        EmployeeEdit::Name(name) => {
            let name = validate_name("employee name", &name)?;
            if area.employees.iter().any(|e| e.id != id && e.name == name) {
                return Err(duplicate_employee(name));
            }
            area.employees[position].name = name;
        }
        EmployeeEdit::Hours(hours) => {
            let hours = validate_hours(hours)?;
            ensure_hours_fit(area, Some(id), hours)?;
            area.employees[position].hours = hours;
        }
    }
    Ok(())
}

/// Fails unless the area's hours still add up once `hours` is added, or
/// replaces the hours of the employee `replacing`.
fn ensure_hours_fit(area: &Area, replacing: Option<EmployeeId>, hours: Decimal) -> EngineResult<()> {
    let others = area
        .employees
        .iter()
        .filter(|e| Some(e.id) != replacing)
        .map(|e| e.hours);
    checked_sum("total hours", others.chain(std::iter::once(hours))).map(|_| ())
}

fn take_employee(
    areas: &mut AreaCollection,
    area_name: &str,
    id: EmployeeId,
) -> EngineResult<Employee> {
    let area = area_mut(areas, area_name)?;
    let position = position_of(area, area_name, id)?;
    Ok(area.employees.remove(position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::NotificationKind;
    use crate::persistence::MemoryKeyValueStore;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn empty_store() -> AreaStore<MemoryKeyValueStore> {
        AreaStore::open(
            AreaRepository::new(MemoryKeyValueStore::new()),
            Notifier::default(),
        )
    }

    fn staffed_store() -> AreaStore<MemoryKeyValueStore> {
        let mut store = empty_store();
        store.add_area("Bar", 60.0).unwrap();
        store.add_area("Kitchen", 40.0).unwrap();
        store.add_employee("Bar", "x", 2.0).unwrap();
        store.add_employee("Bar", "y", 2.0).unwrap();
        store.add_employee("Kitchen", "z", 5.0).unwrap();
        store
    }

    fn saved(store: &AreaStore<MemoryKeyValueStore>) -> AreaCollection {
        let raw = store.repository().backend().get("areas").unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    fn names(store: &AreaStore<MemoryKeyValueStore>, area: &str) -> Vec<String> {
        store
            .areas()
            .area(area)
            .unwrap()
            .employees
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }

    #[test]
    fn test_open_loads_existing_snapshot() {
        let raw = r#"{"Bar": {"percentage": 100, "empleados": [{"nombre": "x", "horas": 3, "propinas": 0}]}}"#;
        let store = AreaStore::open(
            AreaRepository::new(MemoryKeyValueStore::with_entry("areas", raw)),
            Notifier::default(),
        );
        assert_eq!(names(&store, "Bar"), vec!["x"]);
    }

    #[test]
    fn test_add_area_persists_and_notifies() {
        let mut store = empty_store();

        store.add_area("  Bar ", 60.0).unwrap();

        let area = store.areas().area("Bar").unwrap();
        assert_eq!(area.percentage, dec("60"));
        assert!(area.employees.is_empty());
        assert_eq!(saved(&store), *store.areas());

        let notification = store.notifier().current().unwrap();
        assert_eq!(notification.kind, NotificationKind::Success);
        assert_eq!(notification.message, "Area added successfully.");
    }

    #[test]
    fn test_add_area_rejects_blank_name_and_bad_percentages() {
        let mut store = empty_store();

        for (name, pct) in [("  ", 10.0), ("Bar", 0.0), ("Bar", f64::NAN), ("Bar", -5.0)] {
            let result = store.add_area(name, pct);
            assert!(
                matches!(result, Err(EngineError::Validation { .. })),
                "{:?} / {} should be rejected, got {:?}",
                name,
                pct,
                result
            );
        }
        assert!(store.areas().is_empty());
        assert!(store.repository().backend().get("areas").unwrap().is_none());
    }

    #[test]
    fn test_add_area_over_budget_is_rejected() {
        let mut store = empty_store();
        store.add_area("Bar", 70.0).unwrap();

        match store.add_area("Kitchen", 40.0) {
            Err(EngineError::BudgetExceeded {
                requested,
                available,
            }) => {
                assert_eq!(requested, dec("40"));
                assert_eq!(available, dec("30"));
            }
            other => panic!("Expected BudgetExceeded, got {:?}", other),
        }
        assert_eq!(store.areas().len(), 1);
        assert_eq!(store.areas().total_percentage().unwrap(), dec("70"));

        let notification = store.notifier().current().unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);
        assert!(notification.message.contains("cannot exceed 100%"));
    }

    #[test]
    fn test_percentage_over_one_hundred_is_a_budget_error() {
        let mut store = empty_store();

        match store.add_area("Bar", 120.0) {
            Err(EngineError::BudgetExceeded {
                requested,
                available,
            }) => {
                assert_eq!(requested, dec("120"));
                assert_eq!(available, dec("100"));
            }
            other => panic!("Expected BudgetExceeded, got {:?}", other),
        }
        assert!(store.areas().is_empty());
    }

    #[test]
    fn test_add_area_up_to_exactly_one_hundred() {
        let mut store = empty_store();
        store.add_area("Bar", 70.0).unwrap();
        store.add_area("Kitchen", 30.0).unwrap();
        assert!(store.areas().is_fully_allocated());
    }

    #[test]
    fn test_duplicate_area_name_is_rejected_without_overwrite() {
        let mut store = empty_store();
        store.add_area("Bar", 30.0).unwrap();
        store.add_employee("Bar", "x", 1.0).unwrap();

        let result = store.add_area("Bar", 10.0);

        assert!(matches!(result, Err(EngineError::DuplicateName { .. })));
        let bar = store.areas().area("Bar").unwrap();
        assert_eq!(bar.percentage, dec("30"));
        assert_eq!(bar.employees.len(), 1);
    }

    #[test]
    fn test_add_employee_starts_with_zero_tips() {
        let mut store = empty_store();
        store.add_area("Bar", 50.0).unwrap();

        let id = store.add_employee("Bar", "Ana", 7.5).unwrap();

        let employee = store.areas().area("Bar").unwrap().employee(id).unwrap();
        assert_eq!(employee.name, "Ana");
        assert_eq!(employee.hours, dec("7.5"));
        assert_eq!(employee.tips, Decimal::ZERO);
        assert_eq!(saved(&store), *store.areas());
    }

    #[test]
    fn test_add_employee_validation() {
        let mut store = empty_store();
        store.add_area("Bar", 50.0).unwrap();

        for (area, name, hours) in [
            ("", "Ana", 4.0),
            ("Bar", " ", 4.0),
            ("Bar", "Ana", f64::NAN),
            ("Bar", "Ana", 0.0),
            ("Bar", "Ana", -1.0),
        ] {
            assert!(matches!(
                store.add_employee(area, name, hours),
                Err(EngineError::Validation { .. })
            ));
        }
        assert_eq!(store.areas().employee_count(), 0);
    }

    #[test]
    fn test_add_employee_to_unknown_area() {
        let mut store = empty_store();
        store.add_area("Bar", 50.0).unwrap();
        let before = store.areas().clone();

        match store.add_employee("Patio", "Ana", 4.0) {
            Err(EngineError::AreaNotFound { name }) => assert_eq!(name, "Patio"),
            other => panic!("Expected AreaNotFound, got {:?}", other),
        }
        assert_eq!(*store.areas(), before);
    }

    #[test]
    fn test_duplicate_employee_name_within_area() {
        let mut store = empty_store();
        store.add_area("Bar", 50.0).unwrap();
        store.add_area("Kitchen", 50.0).unwrap();

        store.add_employee("Bar", "Ana", 4.0).unwrap();
        assert!(matches!(
            store.add_employee("Bar", "Ana", 2.0),
            Err(EngineError::DuplicateName { .. })
        ));
        store.add_employee("Bar", "ana", 2.0).unwrap();
        store.add_employee("Kitchen", "Ana", 3.0).unwrap();

        assert_eq!(names(&store, "Bar"), vec!["Ana", "ana"]);
        assert_eq!(names(&store, "Kitchen"), vec!["Ana"]);
    }

    #[test]
    fn test_remove_area_cascades_and_is_idempotent() {
        let mut store = staffed_store();

        assert!(store.remove_area("Bar").unwrap());
        assert!(!store.areas().contains("Bar"));
        assert_eq!(store.areas().employee_count(), 1);
        assert!(!saved(&store).contains("Bar"));

        store.notifier().clear();
        let snapshot = store.repository().backend().get("areas").unwrap();
        assert!(!store.remove_area("Bar").unwrap());
        assert!(store.notifier().current().is_none());
        assert_eq!(store.repository().backend().get("areas").unwrap(), snapshot);
        assert!(matches!(
            store.add_employee("Bar", "x", 1.0),
            Err(EngineError::AreaNotFound { .. })
        ));
    }

    #[test]
    fn test_remove_unknown_area_does_not_save() {
        let mut store = empty_store();

        assert!(!store.remove_area("Patio").unwrap());

        assert!(store.repository().backend().get("areas").unwrap().is_none());
        assert!(store.notifier().current().is_none());
    }

    #[test]
    fn test_hours_that_cannot_add_up_are_rejected() {
        let mut store = empty_store();
        store.add_area("A", 100.0).unwrap();
        store.add_employee("A", "x", 5e28).unwrap();
        let before = store.areas().clone();

        let result = store.add_employee("A", "y", 5e28);

        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
        assert_eq!(*store.areas(), before);

        store.add_employee("A", "y", 1.0).unwrap();
        assert!(matches!(
            store.edit_employee("A", 1, "hours", "50000000000000000000000000000"),
            Err(EngineError::CalculationError { .. })
        ));
        // Replacing an employee's own hours only counts them once.
        store
            .edit_employee("A", 0, "hours", "70000000000000000000000000000")
            .unwrap();
    }

    #[test]
    fn test_remove_area_frees_budget() {
        let mut store = staffed_store();
        store.remove_area("Kitchen").unwrap();
        store.add_area("Patio", 40.0).unwrap();
        assert!(store.areas().is_fully_allocated());
    }

    #[test]
    fn test_edit_employee_name_and_hours() {
        let mut store = staffed_store();

        assert!(store.edit_employee("Bar", 0, "name", "Xavier").unwrap());
        assert!(store.edit_employee("Bar", 1, "horas", "6.5").unwrap());

        let bar = store.areas().area("Bar").unwrap();
        assert_eq!(bar.employees[0].name, "Xavier");
        assert_eq!(bar.employees[1].hours, dec("6.5"));
        assert_eq!(saved(&store), *store.areas());
    }

    #[test]
    fn test_edit_employee_allows_zero_hours() {
        let mut store = staffed_store();
        store.edit_employee("Kitchen", 0, "hours", "0").unwrap();
        assert_eq!(store.areas().area("Kitchen").unwrap().employees[0].hours, Decimal::ZERO);
    }

    #[test]
    fn test_edit_employee_rejects_non_numeric_hours() {
        let mut store = staffed_store();
        let before = store.areas().clone();

        let result = store.edit_employee("Bar", 0, "hours", "lots");

        assert!(matches!(result, Err(EngineError::Validation { .. })));
        assert_eq!(*store.areas(), before);
    }

    #[test]
    fn test_edit_employee_unsupported_field_is_noop() {
        let mut store = staffed_store();
        store.notifier().clear();
        let before = store.areas().clone();

        assert!(!store.edit_employee("Bar", 0, "propinas", "1000").unwrap());
        assert!(!store.edit_employee("Nowhere", 99, "tips", "1000").unwrap());

        assert_eq!(*store.areas(), before);
        assert!(store.notifier().current().is_none());
    }

    #[test]
    fn test_edit_employee_index_out_of_range() {
        let mut store = staffed_store();

        match store.edit_employee("Kitchen", 1, "name", "Zoe") {
            Err(EngineError::IndexOutOfRange { area, index, len }) => {
                assert_eq!(area, "Kitchen");
                assert_eq!(index, 1);
                assert_eq!(len, 1);
            }
            other => panic!("Expected IndexOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_employee_rename_collision_and_blank() {
        let mut store = staffed_store();

        assert!(matches!(
            store.edit_employee("Bar", 0, "name", "y"),
            Err(EngineError::DuplicateName { .. })
        ));
        assert!(matches!(
            store.edit_employee("Bar", 0, "name", "   "),
            Err(EngineError::Validation { .. })
        ));
        // Renaming to its own name is allowed.
        store.edit_employee("Bar", 0, "name", "x").unwrap();
        assert_eq!(names(&store, "Bar"), vec!["x", "y"]);
    }

    #[test]
    fn test_remove_employee_by_index() {
        let mut store = staffed_store();

        let removed = store.remove_employee("Bar", 0).unwrap();

        assert_eq!(removed.name, "x");
        assert_eq!(names(&store, "Bar"), vec!["y"]);
        assert!(matches!(
            store.remove_employee("Bar", 1),
            Err(EngineError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            store.remove_employee("Patio", 0),
            Err(EngineError::AreaNotFound { .. })
        ));
    }

    #[test]
    fn test_ids_stay_valid_after_sibling_removal() {
        let mut store = empty_store();
        store.add_area("Bar", 100.0).unwrap();
        store.add_employee("Bar", "a", 1.0).unwrap();
        let b = store.add_employee("Bar", "b", 1.0).unwrap();
        let c = store.add_employee("Bar", "c", 1.0).unwrap();

        store.remove_employee_by_id("Bar", b).unwrap();
        store
            .edit_employee_by_id("Bar", c, EmployeeEdit::hours(9.0).unwrap())
            .unwrap();

        let bar = store.areas().area("Bar").unwrap();
        assert_eq!(bar.employee(c).unwrap().hours, dec("9"));
        assert!(matches!(
            store.remove_employee_by_id("Bar", b),
            Err(EngineError::EmployeeNotFound { .. })
        ));
    }

    #[test]
    fn test_edit_by_id_rejects_negative_hours() {
        let mut store = staffed_store();
        let id = store.areas().area("Kitchen").unwrap().employees[0].id;

        let result = store.edit_employee_by_id("Kitchen", id, EmployeeEdit::Hours(dec("-3")));

        assert!(matches!(result, Err(EngineError::Validation { .. })));
        assert_eq!(
            store.areas().area("Kitchen").unwrap().employees[0].hours,
            dec("5")
        );
    }

    #[test]
    fn test_replace_installs_and_persists() {
        let mut store = staffed_store();
        let mut next = store.areas().clone();
        next.remove("Kitchen");

        store.replace(next.clone());

        assert_eq!(*store.areas(), next);
        assert_eq!(saved(&store), next);
    }
}
