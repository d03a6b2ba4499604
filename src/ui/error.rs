use crate::error::{AppError, JoinError, MediaAccessKind};
use crate::ui::ErrorModal;

/// Content and behaviour of the error modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    /// `"{name}: {message}"`, or just the name when there is no message
    pub label: String,
    pub body: String,
    pub backdrop_dismiss: bool,
    pub keyboard_dismiss: bool,
}

impl ErrorView {
    pub fn from_error(error: &AppError) -> Self {
        let message = error.message();
        let label = if message.is_empty() {
            error.name().to_string()
        } else {
            format!("{}: {}", error.name(), message)
        };

        Self {
            label,
            body: user_friendly_message(error),
            backdrop_dismiss: false,
            keyboard_dismiss: false,
        }
    }
}

/// Render `error` into the error modal and show it. The modal cannot be
/// dismissed by backdrop click or keyboard.
pub fn show_error(modal: &mut dyn ErrorModal, error: &AppError) {
    let view = ErrorView::from_error(error);
    tracing::warn!(label = %view.label, "Showing error");
    modal.show(view);
}

/// Explanation of `error` aimed at the person in front of the screen
pub fn user_friendly_message(error: &AppError) -> String {
    match error {
        AppError::Unsupported => {
            "This browser cannot run the video client. Please switch to a recent \
             version of a supported browser."
                .to_string()
        }
        AppError::MediaAccess(e) => {
            let device = e.device.label();
            match e.kind {
                MediaAccessKind::PermissionDenied => format!(
                    "Access to your {} was denied. Allow it in the browser's site \
                     settings and reload the page.",
                    device
                ),
                MediaAccessKind::NotFound => format!(
                    "No {} could be found. Connect one and reload the page.",
                    device
                ),
                MediaAccessKind::NotReadable => format!(
                    "Your {} is being used by another application. Close it and \
                     reload the page.",
                    device
                ),
                MediaAccessKind::Overconstrained => format!(
                    "Your {} does not support the requested capture settings.",
                    device
                ),
                MediaAccessKind::Unsupported => {
                    "Media capture is only available on secure (https) pages in \
                     browsers that support it."
                        .to_string()
                }
                MediaAccessKind::Other => e.message.clone(),
            }
        }
        AppError::Join(JoinError::TokenStatus { .. }) | AppError::Join(JoinError::TokenTransport(_)) => {
            "Could not get an access token for the room. Check your connection and \
             try again."
                .to_string()
        }
        AppError::Join(JoinError::Connect(e)) => format!("Could not join the room: {}", e.message),
        AppError::Join(JoinError::Disconnected(e)) => {
            format!("You were disconnected from the room: {}", e.message)
        }
        other => other.message(),
    }
}
