use crate::{Entity, ResourceMsg, ResourceState};

/// Pure update function: applies one operation step to a resource state.
///
/// Every message other than `Started` completes exactly one in-flight
/// operation. Results are applied in the order they arrive.
pub fn update<T: Entity>(mut state: ResourceState<T>, msg: ResourceMsg<T>) -> ResourceState<T> {
    match msg {
        ResourceMsg::Started => {
            state.begin();
            return state;
        }
        ResourceMsg::Listed { items, pagination } => {
            state.replace_all(items, pagination);
        }
        ResourceMsg::Fetched(item) => {
            state.replace(item.clone());
            state.set_current(Some(item));
        }
        ResourceMsg::Created(item) => {
            state.insert(item.clone());
            state.set_current(Some(item));
        }
        ResourceMsg::Updated(item) => {
            state.replace(item.clone());
            state.set_current(Some(item));
        }
        ResourceMsg::Deleted { id } => {
            state.remove(&id);
        }
        ResourceMsg::Failed { message } => {
            state.fail(message);
        }
    }
    state.finish();
    state
}
