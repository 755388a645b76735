//! Portfolio intake: the wizard plus the one request that submits it.

use shared::{routes::Route, wizard::PortfolioWizard};

use crate::{api::PortfolioApi, errors::CanvasError, session::Session};

/// Drives a [`PortfolioWizard`] to a created portfolio.
///
/// At most one submission is outstanding at a time. A failed submission
/// leaves the wizard untouched so it can be corrected and retried.
#[derive(Debug)]
pub struct IntakeFlow<A> {
    api: A,
    session: Session,
    wizard: PortfolioWizard,
    in_flight: bool,
}

/// Marks a submission as outstanding until dropped, so a cancelled submit
/// leaves the flow usable.
struct InFlightGuard<'a>(&'a mut bool);

impl<'a> InFlightGuard<'a> {
    fn enter(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

impl<A: PortfolioApi> IntakeFlow<A> {
    /// Start a fresh wizard that submits through `api` as the user in `session`.
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            session,
            wizard: PortfolioWizard::new(),
            in_flight: false,
        }
    }

    /// The wizard being filled in.
    #[must_use]
    pub fn wizard(&self) -> &PortfolioWizard {
        &self.wizard
    }

    /// Mutable access to the wizard, for editing fields and steps.
    pub fn wizard_mut(&mut self) -> &mut PortfolioWizard {
        &mut self.wizard
    }

    /// Whether a create request is outstanding.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    /// Submit the finalized draft and resolve where to go next.
    ///
    /// Without a stored credential no request is made and the flow resolves
    /// to [`Route::Login`]. On success it resolves to the new portfolio under
    /// its template.
    ///
    /// # Errors
    /// [`CanvasError::Validation`] or [`CanvasError::NotOnDetailsStep`] when the
    /// wizard is not ready, [`CanvasError::InFlight`] while a submission is
    /// outstanding, and [`CanvasError::Submission`] when the server refuses.
    pub async fn submit(&mut self) -> Result<Route, CanvasError> {
        if self.in_flight {
            return Err(CanvasError::InFlight);
        }
        let finalized = self.wizard.finalize()?;

        let Some(credential) = self.session.credential() else {
            tracing::info!("not signed in; redirecting to login");
            return Ok(Route::Login);
        };

        let outcome = {
            let _in_flight = InFlightGuard::enter(&mut self.in_flight);
            self.api
                .create_portfolio(finalized.template(), finalized.profile(), &credential)
                .await
        };

        let identifier = outcome?;
        Ok(Route::portfolio(finalized.template(), identifier))
    }
}
