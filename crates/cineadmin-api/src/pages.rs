//! Static pages shown to end users.

use std::fmt;

/// Confirmation shown after a ticket payment completes.
///
/// Pure content: no inputs, no state, no side effects beyond logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentSuccessPage;

impl PaymentSuccessPage {
    const TITLE: &'static str = "Payment Successful";
    const BODY: [&'static str; 2] = [
        "Thank you for choosing CineVision. Your payment has been completed. \
         Ticket details have been sent to your email address.",
        "CineVision Family wishes you a great movie experience.",
    ];

    /// Page heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        Self::TITLE
    }

    /// Body paragraphs, in display order.
    #[must_use]
    pub const fn lines(self) -> &'static [&'static str] {
        &Self::BODY
    }

    /// Emits the page through the log output.
    pub fn render(self) {
        tracing::info!("{}", self.title());
        for line in self.lines() {
            tracing::info!("{line}");
        }
    }
}

impl fmt::Display for PaymentSuccessPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title())?;
        for line in self.lines() {
            writeln!(f)?;
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
