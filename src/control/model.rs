use super::appearance::{Appearance, HexColor, LabelText};
use super::geometry::{Bounds, PanelLayout, Point};
use super::spring::{SpringAnimation, SpringProfile};
use super::{CONFIRM_THRESHOLD_FRACTION, TRIGGER_AREA_FRACTION};
use std::path::PathBuf;
use std::time::Duration;
use strum::Display as StrumDisplay;

/// Tunables of the gesture. Fractions are relative to the control width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlConfig {
    pub trigger_area_fraction: f64,
    pub confirm_threshold_fraction: f64,
    pub spring: SpringProfile,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            trigger_area_fraction: TRIGGER_AREA_FRACTION,
            confirm_threshold_fraction: CONFIRM_THRESHOLD_FRACTION,
            spring: SpringProfile::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, StrumDisplay)]
pub enum ControlState {
    Idle,
    /// `origin` is where the gesture was pressed, shifted back by the panel's
    /// displacement when it was grabbed mid-settle; `offset` is the horizontal
    /// displacement of the latest sample from it.
    Tracking { origin: Point, offset: f64 },
    SettlingReset,
    SettlingConfirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum SettleKind {
    Reset,
    Confirm,
}

impl SettleKind {
    fn target_progress(self) -> f64 {
        match self {
            Self::Reset => 0.0,
            Self::Confirm => 1.0,
        }
    }

    fn state(self) -> ControlState {
        match self {
            Self::Reset => ControlState::SettlingReset,
            Self::Confirm => ControlState::SettlingConfirm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SettleRequest {
    kind: SettleKind,
    animated: bool,
}

/// What the host has to do after feeding the control an input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlAction {
    pub should_redraw: bool,
    /// The control is animating and wants `tick` on every frame.
    pub needs_frames: bool,
    /// Number of value-changed notifications to deliver.
    pub value_changed: u32,
}

impl ControlAction {
    pub fn new(should_redraw: bool, needs_frames: bool, value_changed: u32) -> Self {
        Self {
            should_redraw,
            needs_frames,
            value_changed,
        }
    }

    pub fn redraw() -> Self {
        Self::new(true, false, 0)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            should_redraw: self.should_redraw || other.should_redraw,
            needs_frames: self.needs_frames || other.needs_frames,
            value_changed: self.value_changed + other.value_changed,
        }
    }
}

/// The slide-to-confirm state machine.
///
/// The displayed position is kept as drag progress (offset divided by the
/// width), so the host may resize the control between calls; every input
/// that needs geometry takes the current [`Bounds`].
#[derive(Debug, Clone)]
pub struct SlideControl {
    config: ControlConfig,
    appearance: Appearance,
    state: ControlState,
    progress: f64,
    animation: Option<SpringAnimation>,
    queued: Option<SettleRequest>,
}

impl SlideControl {
    pub fn new(config: ControlConfig, appearance: Appearance) -> Self {
        Self {
            config,
            appearance,
            state: ControlState::Idle,
            progress: 0.0,
            animation: None,
            queued: None,
        }
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn drag_origin(&self) -> Option<Point> {
        match self.state {
            ControlState::Tracking { origin, .. } => Some(origin),
            _ => None,
        }
    }

    pub fn current_offset(&self) -> Option<f64> {
        match self.state {
            ControlState::Tracking { offset, .. } => Some(offset),
            _ => None,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn layout(&self, bounds: Bounds) -> PanelLayout {
        PanelLayout::for_progress(self.progress, bounds)
    }

    /// Starts a drag. Accepted while idle, and while the panel springs back
    /// to rest so a user can grab it again mid-animation; a confirm that is
    /// settling is never interrupted.
    pub fn press_begin(&mut self, point: Point, bounds: Bounds) -> ControlAction {
        let grabbing = match self.state {
            ControlState::Idle => false,
            ControlState::SettlingReset => true,
            _ => return ControlAction::default(),
        };
        if bounds.width <= 0.0 {
            return ControlAction::default();
        }

        let layout = self.layout(bounds);
        let fraction = self.config.trigger_area_fraction;
        if !layout.in_trigger_area(point, bounds, fraction) {
            log::debug!("Press at ({}, {}) outside trigger area", point.x, point.y);
            return ControlAction::default();
        }

        // measure the drag from where the panel sits now
        let displacement = self.progress * bounds.width;
        if grabbing {
            log::debug!("Grabbed panel while settling at offset {}", displacement);
            self.animation = None;
            self.queued = None;
        }

        let origin = Point::new(point.x - displacement, point.y);
        log::debug!("Tracking from ({}, {})", point.x, point.y);
        self.track(origin, point, bounds)
    }

    pub fn press_move(&mut self, point: Point, bounds: Bounds) -> ControlAction {
        let ControlState::Tracking { origin, .. } = self.state else {
            return ControlAction::default();
        };

        if !bounds.contains_x(point.x) {
            log::debug!("Drag left the control at x = {}", point.x);
            return self.settle(SettleKind::Reset, true);
        }

        self.track(origin, point, bounds)
    }

    /// Ends the gesture. `None` stands for a release the host could not
    /// locate (or a cancelled gesture): the panel returns to rest without
    /// checking the threshold.
    pub fn press_end(&mut self, point: Option<Point>, bounds: Bounds) -> ControlAction {
        let ControlState::Tracking { origin, .. } = self.state else {
            return ControlAction::default();
        };

        let kind = match point {
            Some(p) if self.reaches_threshold(p.x - origin.x, bounds) => SettleKind::Confirm,
            _ => SettleKind::Reset,
        };
        self.settle(kind, true)
    }

    pub fn reset(&mut self, animated: bool) -> ControlAction {
        self.settle(SettleKind::Reset, animated)
    }

    pub fn confirm(&mut self, animated: bool) -> ControlAction {
        self.settle(SettleKind::Confirm, animated)
    }

    /// Advances a running settle animation to frame time `now`.
    pub fn tick(&mut self, now: Duration) -> ControlAction {
        let Some(animation) = self.animation.as_mut() else {
            return ControlAction::default();
        };

        let (value, finished) = animation.sample(now);
        self.progress = value;

        if !finished {
            return ControlAction::new(true, true, 0);
        }

        self.animation = None;
        let kind = match self.state {
            ControlState::SettlingConfirm => SettleKind::Confirm,
            _ => SettleKind::Reset,
        };
        self.finish_settle(kind)
    }

    pub fn set_label_text(&mut self, text: impl Into<String>) -> ControlAction {
        self.appearance.label = LabelText::new(text);
        ControlAction::redraw()
    }

    pub fn set_panel_color(&mut self, color: HexColor) -> ControlAction {
        self.appearance.panel_color = color;
        ControlAction::redraw()
    }

    pub fn set_revealed_color(&mut self, color: HexColor) -> ControlAction {
        self.appearance.revealed_color = color;
        ControlAction::redraw()
    }

    pub fn set_icon(&mut self, icon: Option<PathBuf>) -> ControlAction {
        self.appearance.icon = icon;
        ControlAction::redraw()
    }

    pub fn set_appearance(&mut self, appearance: Appearance) -> ControlAction {
        self.appearance = appearance;
        ControlAction::redraw()
    }

    /// Takes effect immediately: a drag in progress is measured against the
    /// new thresholds from its next sample.
    pub fn set_config(&mut self, config: ControlConfig) {
        self.config = config;
    }

    fn reaches_threshold(&self, offset: f64, bounds: Bounds) -> bool {
        offset >= bounds.width * self.config.confirm_threshold_fraction
    }

    fn track(&mut self, origin: Point, point: Point, bounds: Bounds) -> ControlAction {
        let offset = point.x - origin.x;
        self.state = ControlState::Tracking { origin, offset };
        self.progress = bounds.progress_for_offset(offset);

        if self.reaches_threshold(offset, bounds) {
            return self.settle(SettleKind::Confirm, true);
        }
        ControlAction::redraw()
    }

    fn settle(&mut self, kind: SettleKind, animated: bool) -> ControlAction {
        if self.animation.is_some() {
            log::debug!("Queueing {} behind running animation", kind);
            self.queued = Some(SettleRequest { kind, animated });
            return ControlAction::default();
        }

        let target = kind.target_progress();
        if !animated {
            self.progress = target;
            return self.finish_settle(kind);
        }

        log::debug!("Settling: {}", kind);
        self.state = kind.state();
        self.animation = Some(SpringAnimation::new(
            self.progress,
            target,
            self.config.spring,
        ));
        ControlAction::new(true, true, 0)
    }

    fn finish_settle(&mut self, kind: SettleKind) -> ControlAction {
        self.state = ControlState::Idle;

        let confirmed = kind == SettleKind::Confirm;
        if confirmed {
            log::info!("Slide confirmed");
        }

        let action = ControlAction::new(true, false, u32::from(confirmed));
        match self.queued.take() {
            Some(next) => action.merge(self.settle(next.kind, next.animated)),
            None => action,
        }
    }
}

impl Default for SlideControl {
    fn default() -> Self {
        Self::new(ControlConfig::default(), Appearance::default())
    }
}
