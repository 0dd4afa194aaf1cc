//! Ordered checkout steps shown above the skip grid.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One step of the checkout flow.
pub struct Step {
    /// Stable identifier.
    pub id: &'static str,
    /// Label shown in the step indicator.
    pub label: &'static str,
    /// Whether the step has been completed.
    pub completed: bool,
    /// Whether this is the step the user is on.
    pub active: bool,
}

impl Step {
    const fn new(id: &'static str, label: &'static str, completed: bool, active: bool) -> Self {
        Self {
            id,
            label,
            completed,
            active,
        }
    }
}

/// Steps of the checkout flow with skip selection as the active one.
pub const CHECKOUT_STEPS: [Step; 6] = [
    Step::new("postcode", "Postcode", true, false),
    Step::new("waste-type", "Waste Type", true, false),
    Step::new("select-skip", "Select Skip", false, true),
    Step::new("permit-check", "Permit Check", false, false),
    Step::new("choose-date", "Choose Date", false, false),
    Step::new("payment", "Payment", false, false),
];

/// Step that follows the active one, i.e. where "continue" leads.
#[must_use]
pub fn next_step(steps: &[Step]) -> Option<&Step> {
    let active = steps.iter().position(|step| step.active)?;
    steps.get(active + 1)
}
