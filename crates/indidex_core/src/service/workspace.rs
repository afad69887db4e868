//! Store plus the two live views presented to the UI.

use crate::model::person::Person;
use crate::model::project::Project;
use crate::store::domain_store::DomainStore;
use crate::store::view::FilteredSortedView;

/// Owns the domain store and the views attached to it.
///
/// The project view keeps backing order; the person view carries the active
/// find filter.
#[derive(Debug)]
pub struct Workspace {
    store: DomainStore,
    person_view: FilteredSortedView<Person>,
    project_view: FilteredSortedView<Project>,
}

impl Workspace {
    pub fn new(mut store: DomainStore) -> Self {
        let person_view = store.attach_person_view();
        let project_view = store.attach_project_view(None);
        Self {
            store,
            person_view,
            project_view,
        }
    }

    pub fn store(&self) -> &DomainStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DomainStore {
        &mut self.store
    }

    pub fn person_view(&self) -> &FilteredSortedView<Person> {
        &self.person_view
    }

    pub fn person_view_mut(&mut self) -> &mut FilteredSortedView<Person> {
        &mut self.person_view
    }

    pub fn project_view(&self) -> &FilteredSortedView<Project> {
        &self.project_view
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(DomainStore::new())
    }
}
