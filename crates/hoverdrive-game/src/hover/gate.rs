//! Two independent gates over the controller
//!
//! `enabled` decides whether any per-frame logic runs. `movement_disabled`
//! only blocks force application and look, and is flipped by
//! [`ControlEvent::ToggleMovement`] while the controller is enabled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hoverdrive_core::{ControlEvent, EventBus, ListenerId};
use tracing::debug;

/// Component and movement gates, plus the bus subscription tied to enabling
#[derive(Default)]
pub struct ControlGate {
    enabled: bool,
    movement_disabled: Arc<AtomicBool>,
    subscription: Option<(EventBus<ControlEvent>, ListenerId)>,
}

impl ControlGate {
    /// A disabled gate with movement allowed
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the component and subscribe to movement toggles.
    ///
    /// Idempotent: enabling twice keeps a single subscription.
    pub fn enable(&mut self, bus: &EventBus<ControlEvent>) {
        if self.enabled {
            return;
        }

        let flag = Arc::clone(&self.movement_disabled);
        let id = bus.subscribe(move |event| {
            if *event == ControlEvent::ToggleMovement {
                let disabled = !flag.fetch_xor(true, Ordering::SeqCst);
                debug!(movement_disabled = disabled, "Movement toggled");
            }
        });

        self.subscription = Some((bus.clone(), id));
        self.enabled = true;
        debug!("Controller enabled");
    }

    /// Disable the component and drop its subscription
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }

        if let Some((bus, id)) = self.subscription.take() {
            bus.unsubscribe(id);
        }
        self.enabled = false;
        debug!("Controller disabled");
    }

    /// Flip the movement gate directly
    pub fn toggle_movement(&self) -> bool {
        let disabled = !self.movement_disabled.fetch_xor(true, Ordering::SeqCst);
        debug!(movement_disabled = disabled, "Movement toggled");
        disabled
    }

    /// Bus joined by the last `enable`, while still enabled
    pub fn bus(&self) -> Option<&EventBus<ControlEvent>> {
        self.subscription.as_ref().map(|(bus, _)| bus)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn movement_disabled(&self) -> bool {
        self.movement_disabled.load(Ordering::SeqCst)
    }

    /// Whether movement and look may run this frame
    pub fn allows_movement(&self) -> bool {
        self.enabled && !self.movement_disabled()
    }
}

impl Drop for ControlGate {
    fn drop(&mut self) {
        self.disable();
    }
}

impl std::fmt::Debug for ControlGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlGate")
            .field("enabled", &self.enabled)
            .field("movement_disabled", &self.movement_disabled())
            .field("subscribed", &self.subscription.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_gate_combinations() {
        let bus = EventBus::<ControlEvent>::new();
        let mut gate = ControlGate::new();
        assert!(!gate.is_enabled());
        assert!(!gate.allows_movement());

        gate.enable(&bus);
        assert!(gate.allows_movement());

        bus.publish(&ControlEvent::ToggleMovement);
        assert!(gate.is_enabled());
        assert!(gate.movement_disabled());
        assert!(!gate.allows_movement());

        gate.disable();
        assert!(!gate.is_enabled());
        assert!(gate.movement_disabled());

        gate.enable(&bus);
        bus.publish(&ControlEvent::ToggleMovement);
        assert!(gate.allows_movement());
    }

    #[test]
    fn test_toggle_pair_restores_state() {
        let bus = EventBus::<ControlEvent>::new();
        let mut gate = ControlGate::new();
        gate.enable(&bus);

        for start in [false, true] {
            assert_eq!(gate.movement_disabled(), start);
            bus.publish(&ControlEvent::ToggleMovement);
            bus.publish(&ControlEvent::ToggleMovement);
            assert_eq!(gate.movement_disabled(), start);
            gate.toggle_movement();
        }
    }

    #[test]
    fn test_subscription_follows_enable_state() {
        let bus = EventBus::<ControlEvent>::new();
        let mut gate = ControlGate::new();

        gate.enable(&bus);
        gate.enable(&bus);
        assert_eq!(bus.listener_count(), 1);

        gate.disable();
        assert_eq!(bus.listener_count(), 0);

        // Toggles while disabled are not heard
        bus.publish(&ControlEvent::ToggleMovement);
        assert!(!gate.movement_disabled());
    }

    #[test]
    fn test_pause_event_does_not_toggle() {
        let bus = EventBus::<ControlEvent>::new();
        let mut gate = ControlGate::new();
        gate.enable(&bus);

        bus.publish(&ControlEvent::PauseRequested);
        assert!(!gate.movement_disabled());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = EventBus::<ControlEvent>::new();
        {
            let mut gate = ControlGate::new();
            gate.enable(&bus);
            assert_eq!(bus.listener_count(), 1);
        }
        assert_eq!(bus.listener_count(), 0);
    }
}
