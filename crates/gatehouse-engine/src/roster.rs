//! Roster administration — the operations behind the admin forms.

use gatehouse_core::{
  clock::Clock,
  person::{Person, PersonStatus, PersonUpdate, Role},
  store::RecordStore,
};

use crate::{CheckpointEngine, Error, Result};

impl<S: RecordStore, C: Clock> CheckpointEngine<S, C> {
  /// Add a person. The id must not be carried by any `Active` row;
  /// `Inactive` history rows do not block reuse.
  pub fn add_person(&self, person: Person) -> Result<Person> {
    let mut people = self.store.load_people().map_err(Error::store)?;

    if people.iter().any(|p| p.id == person.id && p.is_active()) {
      return Err(Error::DuplicateId(person.id));
    }

    people.push(person.clone());
    self.store.save_people(&people).map_err(Error::store)?;

    tracing::info!(id = %person.id, role = %person.role, "added person");
    Ok(person)
  }

  /// Patch role/name/status of the first row carrying `id`.
  pub fn update_person(
    &self,
    id: &str,
    update: PersonUpdate,
  ) -> Result<Person> {
    let mut people = self.store.load_people().map_err(Error::store)?;

    let Some(person) = people.iter_mut().find(|p| p.id == id) else {
      return Err(Error::PersonNotFound(id.to_string()));
    };

    if let Some(role) = update.role {
      person.role = role;
    }
    if let Some(name) = update.name {
      person.name = name;
    }
    if let Some(status) = update.status {
      person.status = status;
    }
    let updated = person.clone();

    self.store.save_people(&people).map_err(Error::store)?;
    tracing::info!(id, "updated person");
    Ok(updated)
  }

  /// Soft delete: flip the row to `Inactive`. The row remains as history
  /// and stops matching scans immediately.
  pub fn deactivate_person(&self, id: &str) -> Result<Person> {
    self.update_person(id, PersonUpdate {
      status: Some(PersonStatus::Inactive),
      ..PersonUpdate::default()
    })
  }

  /// Every `Active` identity row.
  pub fn active_people(&self) -> Result<Vec<Person>> {
    let people = self.store.load_people().map_err(Error::store)?;
    Ok(people.into_iter().filter(Person::is_active).collect())
  }

  /// Every `Active` identity row with the given role.
  pub fn people_by_role(&self, role: Role) -> Result<Vec<Person>> {
    let people = self.store.load_people().map_err(Error::store)?;
    Ok(
      people
        .into_iter()
        .filter(|p| p.role == role && p.is_active())
        .collect(),
    )
  }
}
