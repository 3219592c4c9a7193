//! The page runtime
//!
//! [`Site`] owns every piece of interaction state for one page plus the
//! scheduler that drives it. Surfaces feed it [`UiEvent`]s, call
//! [`Site::frame`] once per painted frame, and draw whatever
//! [`Site::render`] returns. Time is always supplied by the caller.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::SiteConfig;
use crate::counter::{parse_stat, CounterAnimation};
use crate::debounce::Debounce;
use crate::events::{EventSource, UiEvent};
use crate::form::{
    AcknowledgeTimer, ContactForm, FieldName, SimulatedBackend, SubmitBackend, SubmitButton,
    SubmitOutcome,
};
use crate::geometry::Viewport;
use crate::notification::{
    NotificationId, NotificationKind, NotificationManager, NotificationRecord, NotificationTimer,
};
use crate::page::Page;
use crate::render::{
    FieldView, FormView, NavLinkView, NotificationView, PageView, Pulse, Render, Rendered,
    RevealView, StatView,
};
use crate::reveal::{stagger, ObserveMode, RevealObserver, RevealState};
use crate::scheduler::{FrameQueue, TimerId, TimerQueue};
use crate::scroll::{
    AnchorScroll, ParallaxLayer, ScrollCoordinator, ScrollEffects, ScrollInputs, Transform,
};

pub const SUCCESS_MESSAGE: &str =
    "Thank you! Your message has been sent. We will get back to you within 24 hours.";

const STATS_KEY: &str = "stats";
/// Notifications kept for inspection; older ones are dropped
const HISTORY_LIMIT: usize = 50;

/// Work the site schedules on its timer queue
#[derive(Debug, Clone, PartialEq)]
pub enum SiteTask {
    Notification(NotificationTimer),
    Acknowledge,
    /// Trailing recompute once scrolling pauses
    ScrollSettled { offset: f64 },
    /// Staggered reveal of a grid member
    Reveal(String),
    StartCounter(usize),
    CounterTick(usize),
    PulseEnd(usize),
}

impl From<NotificationTimer> for SiteTask {
    fn from(timer: NotificationTimer) -> Self {
        Self::Notification(timer)
    }
}

impl From<AcknowledgeTimer> for SiteTask {
    fn from(_: AcknowledgeTimer) -> Self {
        Self::Acknowledge
    }
}

/// Work requested for the next animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTask {
    ScrollEffects,
    AnchorStep,
}

#[derive(Debug, Clone)]
struct StatSlot {
    label: String,
    text: String,
    counter: Option<CounterAnimation>,
    pulse: Pulse,
}

pub struct Site {
    config: SiteConfig,
    page: Page,
    now: Duration,
    viewport_height: f64,
    scroll_offset: f64,

    timers: TimerQueue<SiteTask>,
    frames: FrameQueue<FrameTask>,

    coordinator: ScrollCoordinator,
    settle: Debounce,
    anchor: AnchorScroll,
    effects: ScrollEffects,
    hero: Option<Transform>,
    about: Option<Transform>,

    reveal: RevealObserver<String>,
    stats_observer: RevealObserver<String>,
    staggered_grids: HashSet<String>,
    stats: Vec<StatSlot>,

    notifications: NotificationManager,
    history: VecDeque<NotificationRecord>,

    form: Option<ContactForm>,
    backend: Box<dyn SubmitBackend>,
}

impl Site {
    /// Attach to `page` at page time zero
    pub fn new(config: SiteConfig, page: Page) -> Self {
        let mut reveal = RevealObserver::new(config.reveal.threshold, ObserveMode::Persistent);
        for target in page.reveal_targets() {
            reveal.observe(target.id.clone());
        }

        let mut stats_observer = RevealObserver::new(config.reveal.stats_threshold, ObserveMode::Once);
        let stats = match page.stats() {
            Some(region) => {
                stats_observer.observe(STATS_KEY.to_string());
                region
                    .items
                    .iter()
                    .map(|item| StatSlot {
                        label: item.label.clone(),
                        text: item.value.clone(),
                        counter: None,
                        pulse: Pulse::None,
                    })
                    .collect()
            }
            None => {
                warn!("page has no stats region; counters disabled");
                Vec::new()
            }
        };

        let form = match page.form() {
            Some(form) => Some(ContactForm::new(
                SubmitButton::new(form.submit_label.clone()),
                config.timing.submit_delay(),
            )),
            None => {
                warn!("page has no contact form; form handling disabled");
                None
            }
        };

        let mut site = Self {
            viewport_height: page.viewport_height,
            now: Duration::ZERO,
            scroll_offset: 0.0,
            timers: TimerQueue::new(),
            frames: FrameQueue::new(),
            coordinator: ScrollCoordinator::new(),
            settle: Debounce::new(config.timing.scroll_debounce()),
            anchor: AnchorScroll::new(config.scroll.clone()),
            effects: ScrollEffects::default(),
            hero: None,
            about: None,
            reveal,
            stats_observer,
            staggered_grids: HashSet::new(),
            stats,
            notifications: NotificationManager::new(&config.timing),
            history: VecDeque::new(),
            form,
            backend: Box::new(SimulatedBackend),
            config,
            page,
        };

        info!(
            title = %site.page.title,
            sections = site.page.sections().len(),
            reveal_targets = site.page.reveal_targets().len(),
            "site attached"
        );
        // Initial layout; observers report what is already on screen
        site.apply_scroll_effects(0.0);
        site
    }

    /// Replace the simulated acknowledgment backend
    pub fn with_backend(mut self, backend: Box<dyn SubmitBackend>) -> Self {
        self.backend = backend;
        self
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Page time the runtime has reached
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn max_scroll(&self) -> f64 {
        self.page.max_scroll(self.viewport_height)
    }

    /// Effects computed by the latest scroll frame
    pub fn effects(&self) -> &ScrollEffects {
        &self.effects
    }

    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// Most recent notifications, oldest first
    pub fn notification_history(&self) -> &VecDeque<NotificationRecord> {
        &self.history
    }

    pub fn form(&self) -> Option<&ContactForm> {
        self.form.as_ref()
    }

    pub fn reveal_state(&self, id: &str) -> RevealState {
        self.reveal.state(&id.to_string())
    }

    /// Text currently shown by stat item `index`
    pub fn stat_text(&self, index: usize) -> Option<&str> {
        self.stats.get(index).map(|slot| slot.text.as_str())
    }

    pub fn is_animating_scroll(&self) -> bool {
        self.anchor.is_animating()
    }

    /// Earliest pending timer deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn has_frame_work(&self) -> bool {
        self.frames.is_pending()
    }

    /// Nothing scheduled and no frame requested
    pub fn is_settled(&self) -> bool {
        self.timers.is_empty() && !self.frames.is_pending()
    }

    /// Show a notification, replacing the current one
    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        let id = self.notifications.notify(&mut self.timers, self.now, message, kind);
        if let Some(record) = self.notifications.current() {
            if self.history.len() == HISTORY_LIMIT {
                self.history.pop_front();
            }
            self.history.push_back(record.clone());
        }
        id
    }

    /// Handle one user event that happened at `now`
    pub fn dispatch(&mut self, now: Duration, event: UiEvent) {
        self.advance(now);
        debug!(?event, now_ms = self.now.as_millis() as u64, "dispatch");

        match event {
            UiEvent::Scroll { offset } => self.on_scroll(offset),
            UiEvent::Resize { viewport_height } => {
                if !viewport_height.is_finite() || viewport_height <= 0.0 {
                    warn!(viewport_height, "ignoring resize to an unusable viewport");
                    return;
                }
                self.viewport_height = viewport_height;
                self.on_scroll(self.scroll_offset);
            }
            UiEvent::AnchorClick { href } => self.follow_anchor(&href),
            UiEvent::Focus { field } => {
                if let Some(form) = self.editable_form() {
                    form.focus(field);
                }
            }
            UiEvent::Blur { field } => {
                if let Some(form) = self.editable_form() {
                    if let Some(problem) = form.blur(field) {
                        debug!(%field, %problem, "field failed validation on blur");
                    }
                }
            }
            UiEvent::Input { field, value } => {
                if let Some(form) = self.editable_form() {
                    form.input(field, value);
                }
            }
            UiEvent::Submit => self.submit(),
            UiEvent::NotificationClose | UiEvent::NotificationClick => {
                self.notifications.dismiss(&mut self.timers, self.now);
            }
            UiEvent::Notify { message, kind } => {
                self.notify(message, kind);
            }
        }
    }

    /// Run every timer due at or before `now`, each at its own deadline
    pub fn advance(&mut self, now: Duration) {
        let now = now.max(self.now);
        while let Some(due) = self.timers.pop_due(now) {
            self.now = due.deadline.max(self.now);
            self.run_task(due.id, due.task);
        }
        self.now = now;
    }

    /// Paint a frame at `now`: run due timers, then the frame requests made before it
    pub fn frame(&mut self, now: Duration) {
        self.advance(now);
        for task in self.frames.take() {
            match task {
                FrameTask::ScrollEffects => {
                    let offset = self.coordinator.run_frame();
                    self.apply_scroll_effects(offset);
                }
                FrameTask::AnchorStep => {
                    if let Some(position) = self.anchor.update(self.now) {
                        self.on_scroll(position);
                        if self.anchor.is_animating() {
                            self.frames.request(FrameTask::AnchorStep);
                        }
                    }
                }
            }
        }
    }

    /// Pull events from `source` and paint frames every `frame_interval` until `until`
    pub fn replay<S>(&mut self, source: &mut S, frame_interval: Duration, until: Duration)
    where
        S: EventSource + ?Sized,
    {
        let frame_interval = frame_interval.max(Duration::from_millis(1));
        loop {
            let frame_at = (self.now + frame_interval).min(until);
            while let Some(event) = source.poll(frame_at) {
                self.dispatch(event.at(), event.event);
            }
            self.frame(frame_at);
            if frame_at >= until {
                break;
            }
        }
    }

    fn editable_form(&mut self) -> Option<&mut ContactForm> {
        let Some(form) = self.form.as_mut() else {
            warn!("contact form missing; ignoring field event");
            return None;
        };
        // Dimmed while sending
        if form.is_locked() {
            return None;
        }
        Some(form)
    }

    fn run_task(&mut self, id: TimerId, task: SiteTask) {
        match task {
            SiteTask::Notification(timer) => {
                self.notifications.on_timer(&mut self.timers, self.now, timer);
            }
            SiteTask::Acknowledge => self.acknowledge(),
            SiteTask::ScrollSettled { offset } => {
                if self.settle.fired(id) {
                    self.apply_scroll_effects(offset);
                }
            }
            SiteTask::Reveal(target) => {
                if self.reveal.mark_appeared(&target) {
                    debug!(%target, "grid member revealed");
                }
            }
            SiteTask::StartCounter(index) => self.start_counter(index),
            SiteTask::CounterTick(index) => self.tick_counter(index),
            SiteTask::PulseEnd(index) => {
                if let Some(slot) = self.stats.get_mut(index) {
                    slot.pulse = Pulse::Settled;
                }
            }
        }
    }

    fn on_scroll(&mut self, offset: f64) {
        let offset = offset.clamp(0.0, self.max_scroll());
        self.scroll_offset = offset;
        if self.coordinator.on_scroll(offset) {
            self.frames.request(FrameTask::ScrollEffects);
        }
        self.settle
            .call(&mut self.timers, self.now, SiteTask::ScrollSettled { offset });
    }

    fn follow_anchor(&mut self, href: &str) {
        let destination = match self.page.anchor_target(href) {
            Ok(section) => section.span.top - self.config.scroll.anchor_offset,
            Err(e) => {
                debug!(error = %e, "anchor target missing; ignoring click");
                return;
            }
        };

        let max_scroll = self.max_scroll();
        match self
            .anchor
            .scroll_to(self.scroll_offset, destination, max_scroll, self.now)
        {
            Some(position) => self.on_scroll(position),
            None => self.frames.request(FrameTask::AnchorStep),
        }
    }

    fn scroll_inputs(&self) -> ScrollInputs<'_> {
        let parallax = &self.config.parallax;
        ScrollInputs {
            viewport_height: self.viewport_height,
            document_height: self.page.document_height(),
            sections: self
                .page
                .sections()
                .iter()
                .map(|s| (s.id.as_str(), s.span))
                .collect(),
            hero: self.page.has_hero_graphic().then(|| {
                ParallaxLayer::new(parallax.hero_speed).with_rotation(parallax.hero_rotation)
            }),
            about: self
                .page
                .about_graphic_section()
                .map(|section| (ParallaxLayer::new(parallax.about_speed), section.span)),
            navbar_threshold: self.config.scroll.navbar_threshold,
            active_link_margin: self.config.scroll.active_link_margin,
        }
    }

    /// Recompute every scroll-dependent effect for `offset`
    fn apply_scroll_effects(&mut self, offset: f64) {
        let effects = ScrollEffects::compute(offset, &self.scroll_inputs());
        self.hero = effects.hero;
        if effects.about.is_some() {
            self.about = effects.about;
        }
        self.effects = effects;
        self.observe_intersections(offset);
    }

    fn observe_intersections(&mut self, offset: f64) {
        let viewport = Viewport::new(offset, self.viewport_height);
        let margin = self.config.reveal.bottom_margin;

        let mut crossed = Vec::new();
        for target in self.page.reveal_targets() {
            let fraction = viewport.visible_fraction(&target.span, margin);
            if self.reveal.measure(&target.id, fraction) {
                crossed.push((target.id.clone(), target.grid.clone()));
            }
        }

        for (id, grid) in crossed {
            if self.reveal.mark_appeared(&id) {
                debug!(target = %id, "revealed");
            }
            if let Some(grid) = grid {
                self.stagger_grid(grid);
            }
        }

        let stats_fraction = self
            .page
            .stats()
            .map(|region| viewport.visible_fraction(&region.span, 0.0));
        if let Some(fraction) = stats_fraction {
            if self.stats_observer.measure(&STATS_KEY.to_string(), fraction) {
                self.start_counters();
            }
        }
    }

    /// Reveal the members of `grid` one after another, once per grid
    fn stagger_grid(&mut self, grid: String) {
        if self.staggered_grids.contains(&grid) {
            return;
        }
        let members = self.page.grid_members(&grid);
        debug!(%grid, members = members.len(), "staggering grid reveal");
        for (delay, member) in stagger(&members, self.config.timing.card_stagger()) {
            self.timers
                .schedule_after(self.now, delay, SiteTask::Reveal(member));
        }
        self.staggered_grids.insert(grid);
    }

    fn start_counters(&mut self) {
        let per_index = self.config.timing.counter_stagger();
        info!(items = self.stats.len(), "stats in view; starting counters");
        for index in 0..self.stats.len() {
            self.timers.schedule_after(
                self.now,
                per_index * index as u32,
                SiteTask::StartCounter(index),
            );
        }
    }

    fn start_counter(&mut self, index: usize) {
        let timing = &self.config.timing;
        let (duration, tick) = (timing.counter_duration(), timing.counter_tick());
        let Some(slot) = self.stats.get_mut(index) else {
            return;
        };
        let Some(stat) = parse_stat(&slot.text) else {
            debug!(text = %slot.text, "stat has nothing to count; left as is");
            return;
        };

        let counter = CounterAnimation::new(stat.number, duration, tick, stat.suffix);
        slot.text = counter.display();
        slot.counter = Some(counter);
        self.timers
            .schedule_after(self.now, tick, SiteTask::CounterTick(index));
    }

    fn tick_counter(&mut self, index: usize) {
        let timing = &self.config.timing;
        let (tick, pulse) = (timing.counter_tick(), timing.pulse());
        let Some(slot) = self.stats.get_mut(index) else {
            return;
        };
        let Some(counter) = slot.counter.as_mut() else {
            return;
        };

        let step = counter.tick();
        slot.text = counter.display();
        if step.done {
            slot.pulse = Pulse::Raised;
            self.timers
                .schedule_after(self.now, pulse, SiteTask::PulseEnd(index));
        } else {
            self.timers
                .schedule_after(self.now, tick, SiteTask::CounterTick(index));
        }
    }

    fn submit(&mut self) {
        let Some(form) = self.form.as_mut() else {
            warn!("contact form missing; ignoring submit");
            return;
        };

        match form.submit(&mut self.timers, self.now) {
            SubmitOutcome::Invalid(errors) => {
                if let Some(first) = errors.first() {
                    debug!(errors = errors.len(), first = %first, "submission rejected by validation");
                    self.notify(first.to_string(), NotificationKind::Error);
                }
            }
            SubmitOutcome::Sending => {}
            SubmitOutcome::Busy => debug!("submission already in flight"),
        }
    }

    fn acknowledge(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match form.complete(self.backend.as_mut()) {
            Some(Ok(())) => {
                self.notify(SUCCESS_MESSAGE, NotificationKind::Success);
            }
            Some(Err(e)) => {
                self.notify(
                    format!("Sorry, your message could not be sent: {}. Please try again.", e),
                    NotificationKind::Error,
                );
            }
            None => {}
        }
    }

    /// Translate the current state into classes and styles
    pub fn render(&self) -> PageView {
        let active = self.effects.active_section.as_deref();
        let nav_links = self
            .page
            .nav_links()
            .iter()
            .map(|link| {
                let is_active = active.is_some() && link.target() == active;
                NavLinkView {
                    label: link.label.clone(),
                    href: link.href.clone(),
                    active: is_active,
                    element: Rendered::default().class("nav-link").class_if("active", is_active),
                }
            })
            .collect();

        let reveal = self
            .page
            .reveal_targets()
            .iter()
            .map(|target| RevealView::new(&target.id, &target.label, self.reveal_state(&target.id)))
            .collect();

        let stats = self
            .stats
            .iter()
            .map(|slot| StatView {
                label: slot.label.clone(),
                text: slot.text.clone(),
                pulse: slot.pulse,
                element: slot.pulse.render().class("stat-number"),
            })
            .collect();

        let form = self.form.as_ref().map(|form| {
            let fields = FieldName::ALL
                .iter()
                .map(|field| FieldView::new(*field, form.values().get(*field), form.field(*field)))
                .collect();
            let mut element = Rendered::default().class("contact-form");
            if form.is_locked() {
                element = element.style("opacity", "0.7").style("pointer-events", "none");
            }
            FormView {
                fields,
                submit: form.button().into(),
                element,
            }
        });

        let notification = self
            .notifications
            .current()
            .zip(self.notifications.phase())
            .map(|(record, phase)| NotificationView::new(record, phase));

        PageView {
            title: self.page.title.clone(),
            scroll_offset: self.scroll_offset,
            viewport_height: self.viewport_height,
            document_height: self.page.document_height(),
            navbar: Rendered::default()
                .class("navbar")
                .class_if("scrolled", self.effects.navbar_scrolled),
            progress: Rendered::default()
                .class("scroll-progress")
                .style("width", format!("{}%", self.effects.progress)),
            progress_percent: self.effects.progress,
            nav_links,
            hero_graphic: self
                .page
                .has_hero_graphic()
                .then(|| self.hero.map(|t| t.render()).unwrap_or_default()),
            about_graphic: self
                .page
                .about_graphic_section()
                .map(|_| self.about.map(|t| t.render()).unwrap_or_default()),
            reveal,
            stats,
            form,
            notification,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ScriptedEvents, TimedEvent};
    use crate::form::{FieldValues, SubmitError};
    use crate::notification::NotificationPhase;
    use crate::page::PageManifest;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn site() -> Site {
        Site::new(SiteConfig::default(), Page::two_cats())
    }

    fn input(field: FieldName, value: &str) -> UiEvent {
        UiEvent::Input {
            field,
            value: value.to_string(),
        }
    }

    fn fill(site: &mut Site, now: Duration, values: [&str; 4]) {
        for (field, value) in FieldName::ALL.into_iter().zip(values) {
            site.dispatch(now, input(field, value));
        }
    }

    struct RejectingBackend;

    impl SubmitBackend for RejectingBackend {
        fn acknowledge(&mut self, _values: &FieldValues) -> Result<(), SubmitError> {
            Err(SubmitError::Rejected("mailbox full".to_string()))
        }
    }

    #[test]
    fn test_initial_state() {
        let site = site();
        let view = site.render();
        assert_eq!(view.active_link().map(|l| l.href.as_str()), Some("#home"));
        assert!(!view.navbar.has_class("scrolled"));
        assert_eq!(view.progress.style_of("width"), Some("0%"));
        // Nothing on the first screen is a reveal target
        assert!(view.reveal.iter().all(|r| r.element.has_class("fade-in") && !r.appeared()));
        assert_eq!(site.stat_text(0), Some("150+"));
        assert!(view.notification.is_none());
    }

    #[test]
    fn test_scroll_burst_is_one_frame_then_debounced_once() {
        let mut site = site();
        for (t, offset) in [(0, 10.0), (2, 20.0), (4, 40.0), (8, 60.0)] {
            site.dispatch(ms(t), UiEvent::Scroll { offset });
        }
        assert!(site.has_frame_work());
        assert_eq!(site.effects().offset, 0.0);

        site.frame(ms(9));
        assert_eq!(site.effects().offset, 60.0);
        assert!(site.render().navbar.has_class("scrolled"));
        assert!(!site.has_frame_work());

        // The trailing recompute fires once, 10ms after the last event
        assert_eq!(site.next_deadline(), Some(ms(18)));
        site.advance(ms(18));
        assert!(site.is_settled());
    }

    #[test]
    fn test_active_link_follows_scroll() {
        let mut site = site();
        site.dispatch(ms(0), UiEvent::Scroll { offset: 1950.0 });
        site.frame(ms(16));
        let view = site.render();
        assert_eq!(view.active_link().map(|l| l.label.as_str()), Some("About"));
        assert_eq!(view.nav_links.iter().filter(|l| l.element.has_class("active")).count(), 1);
    }

    #[test]
    fn test_parallax_transforms() {
        let mut site = site();
        site.dispatch(ms(0), UiEvent::Scroll { offset: 1500.0 });
        site.frame(ms(16));
        let view = site.render();
        assert_eq!(
            view.hero_graphic.as_ref().and_then(|g| g.style_of("transform")),
            Some("translateY(450px) rotate(150deg)")
        );
        // About section [2000, 2900) intersects viewport [1500, 2300)
        assert_eq!(
            view.about_graphic.as_ref().and_then(|g| g.style_of("transform")),
            Some("translateY(300px)")
        );

        // Past the about section the last transform stays
        site.dispatch(ms(100), UiEvent::Scroll { offset: 3200.0 });
        site.frame(ms(116));
        assert_eq!(
            site.render().about_graphic.as_ref().and_then(|g| g.style_of("transform")),
            Some("translateY(300px)")
        );
    }

    #[test]
    fn test_grid_members_reveal_staggered() {
        let mut site = site();
        // Viewport [700, 1500) minus the 50px margin shows the first row of cards
        site.dispatch(ms(0), UiEvent::Scroll { offset: 700.0 });
        site.frame(ms(16));
        assert_eq!(site.reveal_state("services-header"), RevealState::Appeared);
        for card in ["card-web", "card-brand", "card-app"] {
            assert_eq!(site.reveal_state(card), RevealState::Appeared, "{}", card);
        }
        // The second row is off screen but follows on the grid's schedule
        assert_eq!(site.reveal_state("card-seo"), RevealState::Pending);

        site.advance(ms(300));
        assert_eq!(site.reveal_state("card-seo"), RevealState::Pending);
        site.advance(ms(520));
        for card in ["card-seo", "card-content", "card-support"] {
            assert_eq!(site.reveal_state(card), RevealState::Appeared, "{}", card);
        }
        assert_eq!(site.reveal_state("about-text"), RevealState::Pending);
    }

    #[test]
    fn test_stats_count_up_once() {
        let mut site = site();
        // Stats region [2480, 2680) fully inside [2000, 2800)
        site.dispatch(ms(0), UiEvent::Scroll { offset: 2000.0 });
        site.frame(ms(16));
        assert_eq!(site.stat_text(0), Some("0+"));
        assert_eq!(site.stat_text(1), Some("98%"));

        site.advance(ms(216));
        assert_eq!(site.stat_text(1), Some("0%"));

        site.advance(ms(1000));
        let midway: u64 = site
            .stat_text(0)
            .and_then(|t| t.trim_end_matches('+').parse().ok())
            .unwrap();
        assert!(midway > 0 && midway < 150);

        site.advance(ms(2100));
        assert_eq!(site.stat_text(0), Some("150+"));
        assert_eq!(site.render().stats[0].element.style_of("transform"), Some("scale(1.1)"));
        site.advance(ms(2600));
        assert_eq!(site.stat_text(1), Some("98%"));
        assert_eq!(site.stat_text(2), Some("24h"));
        assert_eq!(site.render().stats[0].element.style_of("transform"), Some("scale(1)"));

        // Leaving and coming back does not restart anything
        site.dispatch(ms(3000), UiEvent::Scroll { offset: 0.0 });
        site.frame(ms(3016));
        site.dispatch(ms(3100), UiEvent::Scroll { offset: 2000.0 });
        site.frame(ms(3116));
        assert_eq!(site.stat_text(0), Some("150+"));
        assert!(site.is_settled());
    }

    #[test]
    fn test_anchor_click_scrolls_smoothly() {
        let mut site = site();
        site.dispatch(ms(0), UiEvent::AnchorClick { href: "#about".to_string() });
        assert!(site.is_animating_scroll());

        // 1920px of travel takes 960ms
        let mut t = 0;
        let mut last = 0.0;
        while t < 1100 {
            t += 16;
            site.frame(ms(t));
            assert!(site.scroll_offset() >= last);
            last = site.scroll_offset();
        }
        assert!(!site.is_animating_scroll());
        assert_eq!(site.scroll_offset(), 1920.0);
        site.frame(ms(1116));
        assert_eq!(site.render().active_link().map(|l| l.href.as_str()), Some("#about"));
    }

    #[test]
    fn test_anchor_to_missing_section_is_noop() {
        let mut site = site();
        site.dispatch(ms(0), UiEvent::AnchorClick { href: "#pricing".to_string() });
        assert!(!site.is_animating_scroll());
        assert!(!site.has_frame_work());
        assert_eq!(site.scroll_offset(), 0.0);
    }

    #[test]
    fn test_invalid_submit_surfaces_first_error() {
        let mut site = site();
        fill(&mut site, ms(0), ["A", "bad-email", "web", "short"]);
        site.dispatch(ms(10), UiEvent::Submit);

        let view = site.render();
        let notification = view.notification.as_ref().unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.message, "Please enter a valid email address");
        assert!(view.field(FieldName::Email).unwrap().group.has_class("error"));
        assert!(!view.form.as_ref().unwrap().submit.disabled);
    }

    #[test]
    fn test_valid_submit_round_trip() {
        let mut site = site();
        site.dispatch(ms(0), UiEvent::Focus { field: FieldName::Name });
        fill(
            &mut site,
            ms(0),
            ["Alice", "a@b.com", "design", "This is a long enough message."],
        );
        site.dispatch(ms(100), UiEvent::Submit);

        let view = site.render();
        let form = view.form.as_ref().unwrap();
        assert!(form.submit.disabled);
        assert_eq!(form.submit.label, "Sending...");
        assert!(form.submit.element.has_class("loading"));
        assert_eq!(form.element.style_of("opacity"), Some("0.7"));

        // Locked while sending
        site.dispatch(ms(200), input(FieldName::Name, "Bob"));
        assert_eq!(site.form().unwrap().values().name, "Alice");

        site.advance(ms(1599));
        assert!(site.render().notification.is_none());
        site.advance(ms(1600));
        let view = site.render();
        let form = view.form.as_ref().unwrap();
        assert!(!form.submit.disabled);
        assert_eq!(form.submit.label, "Send message");
        assert!(form.fields.iter().all(|f| f.value.is_empty()));
        assert!(form.fields.iter().all(|f| !f.group.has_class("focused")));
        let notification = view.notification.as_ref().unwrap();
        assert_eq!(notification.kind, NotificationKind::Success);
        assert_eq!(notification.message, SUCCESS_MESSAGE);
    }

    #[test]
    fn test_failed_acknowledgment_keeps_values() {
        let mut site = site().with_backend(Box::new(RejectingBackend));
        fill(
            &mut site,
            ms(0),
            ["Alice", "a@b.com", "design", "This is a long enough message."],
        );
        site.dispatch(ms(0), UiEvent::Submit);
        site.advance(ms(1500));

        let view = site.render();
        assert_eq!(view.notification.as_ref().map(|n| n.kind), Some(NotificationKind::Error));
        assert!(view.notification.unwrap().message.contains("mailbox full"));
        assert!(!site.form().unwrap().is_locked());
        assert_eq!(site.form().unwrap().values().name, "Alice");
    }

    #[test]
    fn test_single_notification_at_every_instant() {
        let mut site = site();
        site.notify("first", NotificationKind::Info);
        site.dispatch(ms(50), UiEvent::Notify {
            message: "second".to_string(),
            kind: NotificationKind::Warning,
        });

        for t in (50..7000).step_by(25) {
            site.advance(ms(t));
            assert!(site.notifications().present_count() <= 1);
            if t < 6050 {
                assert_eq!(
                    site.notifications().current().map(|r| r.message.as_str()),
                    Some("second")
                );
            }
        }
        assert_eq!(site.notifications().present_count(), 0);
        assert_eq!(site.notification_history().len(), 2);
    }

    #[test]
    fn test_close_and_click_dismiss() {
        let mut site = site();
        site.notify("hello", NotificationKind::Info);
        site.advance(ms(100));
        assert_eq!(site.notifications().phase(), Some(NotificationPhase::Visible));

        site.dispatch(ms(500), UiEvent::NotificationClick);
        assert_eq!(site.notifications().phase(), Some(NotificationPhase::Leaving));
        site.advance(ms(900));
        assert_eq!(site.notifications().present_count(), 0);

        site.notify("again", NotificationKind::Info);
        site.dispatch(ms(1000), UiEvent::NotificationClose);
        site.advance(ms(1400));
        assert_eq!(site.notifications().present_count(), 0);
        assert!(site.is_settled());
    }

    #[test]
    fn test_page_without_form_or_stats() {
        let mut manifest = PageManifest::default();
        manifest.form = None;
        manifest.stats = None;
        let page = Page::from_manifest(manifest).unwrap();
        let mut site = Site::new(SiteConfig::default(), page);

        site.dispatch(ms(0), input(FieldName::Name, "Alice"));
        site.dispatch(ms(0), UiEvent::Submit);
        site.dispatch(ms(0), UiEvent::Scroll { offset: 2000.0 });
        site.frame(ms(16));

        let view = site.render();
        assert!(view.form.is_none());
        assert!(view.stats.is_empty());
        assert!(view.notification.is_none());
        assert_eq!(view.active_link().map(|l| l.href.as_str()), Some("#about"));
    }

    #[test]
    fn test_replay_scenario() {
        let mut site = site();
        let mut source = ScriptedEvents::new(vec![
            TimedEvent::new(ms(0), UiEvent::Scroll { offset: 100.0 }),
            TimedEvent::new(ms(40), UiEvent::Submit),
            TimedEvent::new(ms(500), UiEvent::Resize { viewport_height: 600.0 }),
        ]);
        site.replay(&mut source, ms(16), ms(1000));

        assert_eq!(site.now(), ms(1000));
        assert!(source.is_exhausted());
        assert_eq!(site.viewport_height(), 600.0);
        assert_eq!(site.effects().offset, 100.0);
        assert_eq!(
            site.notification_history().front().map(|r| r.message.as_str()),
            Some("Please enter your name")
        );
    }

    #[test]
    fn test_unusable_resize_ignored() {
        let mut site = site();
        site.dispatch(ms(0), UiEvent::Resize { viewport_height: f64::NAN });
        site.dispatch(ms(0), UiEvent::Resize { viewport_height: 0.0 });
        site.dispatch(ms(0), UiEvent::Resize { viewport_height: f64::INFINITY });
        assert_eq!(site.viewport_height(), 800.0);
        assert_eq!(site.max_scroll(), 3200.0);

        site.dispatch(ms(10), UiEvent::Scroll { offset: 1000.0 });
        site.frame(ms(16));
        assert_eq!(site.scroll_offset(), 1000.0);
        assert_eq!(site.render().progress.style_of("width"), Some("31.25%"));
    }

    #[test]
    fn test_notification_history_is_capped() {
        let mut site = site();
        for i in 0..HISTORY_LIMIT + 5 {
            site.notify(format!("message {}", i), NotificationKind::Info);
        }
        let history = site.notification_history();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history.front().map(|r| r.message.as_str()), Some("message 5"));
        assert_eq!(
            history.back().map(|r| r.message.as_str()),
            Some(format!("message {}", HISTORY_LIMIT + 4).as_str())
        );
    }
}
