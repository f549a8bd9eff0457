use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// The platform bridge could not be reached.
    Platform,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Platform => {
                "Could not reach the camera and speech services. Please try again."
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.value().read().as_ref() {
        Some(Ok(data)) => ViewState::Ready(data.clone()),
        Some(Err(err)) => ViewState::Error(*err),
        None => ViewState::Loading,
    }
}
