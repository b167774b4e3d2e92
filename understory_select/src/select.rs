// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The select controller.
//!
//! [`Select`] owns the selection state and reacts to user intents (typing, pointer, keys,
//! focus). It produces [`SelectEvent`]s instead of calling back into the caller, and reaches the
//! environment only through its [`Host`].
//!
//! ## Usage
//!
//! 1) Build a [`Select`] from a [`SelectConfig`], the mount-time [`SelectProps`], and a host.
//! 2) Forward user input to the intent methods (`input_changed`, `key_down`, `click_option`, ...).
//! 3) Drain [`Select::take_events`] after each batch of input and act on the notifications.
//! 4) Pass the host time to [`Select::focus_in`] and [`Select::focus_out`], and call
//!    [`Select::advance_to`] by [`Select::next_deadline`] so deferred focus/blur work fires.
//! 5) Render from [`Select::selector_view`] and [`Select::dropdown_view`].
//!
//! ## Minimal example
//!
//! ```
//! use understory_select::{Key, Modifiers, NoopHost, Select, SelectConfig, SelectEvent, SelectProps};
//! use understory_select::option::{OptionData, OptionNode};
//! use understory_select::value::SelectValue;
//!
//! let props = SelectProps::with_options([
//!     OptionNode::from(OptionData::new("apple")),
//!     OptionNode::from(OptionData::new("banana")),
//! ]);
//! let mut select = Select::new(SelectConfig::default(), props, NoopHost::new());
//!
//! select.input_changed("ban");
//! assert!(select.key_down(Key::Enter, Modifiers::empty()));
//! assert_eq!(select.value(), Some(SelectValue::from("banana")));
//!
//! let events = select.take_events();
//! assert!(matches!(events.last(), Some(SelectEvent::Change { .. })));
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::config::{Mode, PropsUpdate, SelectConfig, SelectProps};
use crate::event::SelectEvent;
use crate::filter::{FilterContext, FlatItem, VisibleNode, compute_visible, flatten};
use crate::host::{FocusTarget, Host};
use crate::index::OptionsIndex;
use crate::keyboard::{Key, Modifiers};
use crate::navigator::ActiveItem;
use crate::option::{OptionData, OptionNode};
use crate::selection::SelectedValues;
use crate::timer::{BLUR_DELAY_MS, FOCUS_DELAY_MS, TimerKind, Timers};
use crate::value::{
    RawValue, SelectValue, includes_separator, label_from_prop, normalize_input,
    split_by_separators, to_external_shape, to_external_single,
};

/// Headless select state machine.
#[derive(Debug)]
pub struct Select<H: Host> {
    config: SelectConfig,
    host: H,
    options: Vec<OptionNode>,
    index: OptionsIndex,
    values: SelectedValues,
    /// `Some` while the value is controlled by the caller.
    value_prop: Option<SelectValue>,
    open_prop: Option<bool>,
    open: bool,
    input_value: String,
    backfill_value: Option<RawValue>,
    active: ActiveItem,
    visible: Vec<VisibleNode>,
    flat: Vec<FlatItem>,
    focused: bool,
    mouse_down: bool,
    timers: Timers,
    events: Vec<SelectEvent>,
}

impl<H: Host> Select<H> {
    /// Mounts a select.
    pub fn new(config: SelectConfig, props: SelectProps, host: H) -> Self {
        let SelectProps {
            options,
            value,
            default_value,
            open,
            default_open,
        } = props;
        let index = OptionsIndex::rebuild(&options, &config.option_label_prop, None);
        let controlled = value.is_some();
        let mut keys = normalize_input(value.as_ref(), default_value.as_ref(), !controlled);
        if config.mode.is_single() {
            keys.truncate(1);
        }
        let mut values = SelectedValues::new();
        values.replace_with(keys);

        let mut select = Self {
            host,
            options,
            index,
            values,
            value_prop: value,
            open_prop: open,
            open: open.unwrap_or(default_open),
            input_value: String::new(),
            backfill_value: None,
            active: ActiveItem::new(),
            visible: Vec::new(),
            flat: Vec::new(),
            focused: false,
            mouse_down: false,
            timers: Timers::default(),
            events: Vec::new(),
            config,
        };
        if select.config.mode.is_combobox() {
            select.input_value = select.combobox_input(default_value.as_ref());
        }
        select.refresh();
        if select.open {
            select.jump_to_selected();
        }
        tracing::debug!(
            mode = ?select.config.mode,
            values = select.values.len(),
            controlled,
            "mounted select"
        );
        select
    }

    /// Tears the select down, cancelling pending deferred work, and returns the host.
    ///
    /// Undrained events are dropped.
    pub fn unmount(mut self) -> H {
        self.timers.cancel_all();
        tracing::debug!("unmounted select");
        self.host
    }

    /// Applies caller prop changes: options first, then value, then open state.
    pub fn update(&mut self, update: PropsUpdate) {
        let PropsUpdate {
            options,
            value,
            open,
        } = update;

        if let Some(options) = options {
            self.index = OptionsIndex::rebuild(
                &options,
                &self.config.option_label_prop,
                Some((&self.index, self.values.items())),
            );
            self.options = options;
        }

        let was_open = self.is_open();
        if let Some(value) = value {
            self.value_prop = value;
            if let Some(prop) = &self.value_prop {
                let mut keys = normalize_input(Some(prop), None, false);
                if self.config.mode.is_single() {
                    keys.truncate(1);
                }
                self.values.replace_with(keys);
                if self.config.mode.is_combobox() {
                    self.input_value = self.combobox_input(None);
                }
            }
        }

        if let Some(open) = open {
            self.open_prop = open;
            if let Some(open) = open {
                self.open = open;
            }
        }

        self.refresh();
        if !was_open && self.is_open() {
            self.jump_to_selected();
        }
    }

    // --- Accessors -----------------------------------------------------------------------

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The option tree.
    #[must_use]
    pub fn options(&self) -> &[OptionNode] {
        &self.options
    }

    /// The options index.
    #[must_use]
    pub fn index(&self) -> &OptionsIndex {
        &self.index
    }

    /// Selected raw values, in selection order.
    #[must_use]
    pub fn values(&self) -> &[RawValue] {
        self.values.items()
    }

    /// Revision of the selected values; bumped on every change.
    #[must_use]
    pub fn values_revision(&self) -> u64 {
        self.values.revision()
    }

    /// The value in its external shape.
    #[must_use]
    pub fn value(&self) -> Option<SelectValue> {
        self.external(self.values.items())
    }

    /// Returns `true` while the value is controlled by the caller.
    #[must_use]
    pub fn is_value_controlled(&self) -> bool {
        self.value_prop.is_some()
    }

    /// Current search / input text.
    #[must_use]
    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    /// The open flag, before accounting for an empty option list.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open_prop.unwrap_or(self.open)
    }

    /// Whether the dropdown is actually shown.
    ///
    /// A controlled open state always wins. Otherwise, modes with a persistent input (and
    /// single mode without search) hide an open dropdown that would have nothing to show.
    #[must_use]
    pub fn is_dropdown_visible(&self) -> bool {
        if let Some(open) = self.open_prop {
            return open;
        }
        let has_content = !self.flat.is_empty() || self.config.not_found_content.is_some();
        let hides_when_empty = !matches!(self.config.mode, Mode::Single) || !self.config.show_search;
        self.open && (has_content || !hides_when_empty)
    }

    /// Returns `true` while the widget has focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The keyboard-highlighted row of [`Select::flat_items`].
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active.index()
    }

    /// The value currently previewed by backfill.
    #[must_use]
    pub fn backfill_value(&self) -> Option<&RawValue> {
        self.backfill_value.as_ref()
    }

    /// Filtered option tree for the current search.
    #[must_use]
    pub fn visible(&self) -> &[VisibleNode] {
        &self.visible
    }

    /// Filtered rows in render order.
    #[must_use]
    pub fn flat_items(&self) -> &[FlatItem] {
        &self.flat
    }

    /// Display label of `value`.
    ///
    /// Falls back to the label carried by a controlled labeled value, then to the value itself.
    #[must_use]
    pub fn label_of(&self, value: &RawValue) -> String {
        if let Some(info) = self.index.get(value) {
            return info.label.clone();
        }
        let prop = self.value_prop.as_ref().filter(|_| self.config.label_in_value);
        label_from_prop(prop, value).unwrap_or_else(|| value.as_text().into_owned())
    }

    /// Option descriptor of `value`, synthesized when unknown.
    #[must_use]
    pub fn option_of(&self, value: &RawValue) -> OptionData {
        match self.index.get(value) {
            Some(info) => info.option.clone(),
            None => OptionData::new(value.clone()).label(self.label_of(value)),
        }
    }

    /// Drains the notifications produced since the last call.
    pub fn take_events(&mut self) -> Vec<SelectEvent> {
        core::mem::take(&mut self.events)
    }

    /// Earliest pending deferred-work deadline, in host milliseconds.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    // --- Time ----------------------------------------------------------------------------

    /// Records the host clock without running deferred work.
    ///
    /// Work scheduled by later intents, such as the focus notification after opening, is timed
    /// from here. [`Select::advance_to`], [`Select::focus_in`] and [`Select::focus_out`] record
    /// the clock themselves.
    pub fn set_now(&mut self, now_ms: u64) {
        self.timers.set_now(now_ms);
    }

    /// Advances the clock to `now_ms` and runs all deferred work that came due, in deadline
    /// order.
    pub fn advance_to(&mut self, now_ms: u64) {
        while let Some(kind) = self.timers.take_due(now_ms) {
            tracing::debug!(?kind, now_ms, "timer fired");
            match kind {
                TimerKind::BlurCommit => self.commit_blur(),
                TimerKind::Focus => self.events.push(SelectEvent::Focus),
            }
        }
    }

    // --- Intents -------------------------------------------------------------------------

    /// The user edited the input text.
    pub fn input_changed(&mut self, text: impl Into<String>) {
        if self.config.disabled {
            return;
        }
        let text = text.into();
        if self.config.mode.is_multiple()
            && includes_separator(&text, self.config.token_separators.as_slice())
        {
            if let Some(next) = self.value_by_input(&text) {
                self.fire_change(next);
            }
            self.set_open_state(false, true);
            self.set_input_value(String::new(), false);
            return;
        }
        self.set_input_value(text.clone(), true);
        self.set_open_state(true, false);
        if self.config.mode.is_combobox() {
            self.fire_change(Vec::from([RawValue::Text(text)]));
        }
    }

    /// The dropdown trigger asked to open or close.
    pub fn set_dropdown_visible(&mut self, open: bool) {
        if self.config.disabled {
            return;
        }
        if open && !self.focused {
            self.timers.cancel(TimerKind::BlurCommit);
            self.timers.schedule(TimerKind::Focus, FOCUS_DELAY_MS);
            self.focused = true;
        }
        self.set_open_state(open, false);
    }

    /// Opens the dropdown.
    pub fn open_dropdown(&mut self) {
        self.set_dropdown_visible(true);
    }

    /// Closes the dropdown.
    pub fn close_dropdown(&mut self) {
        self.set_dropdown_visible(false);
    }

    /// Flips the dropdown.
    pub fn toggle_open(&mut self) {
        let open = !self.is_open();
        self.set_dropdown_visible(open);
    }

    /// The arrow affordance was clicked.
    pub fn arrow_click(&mut self) {
        if self.config.disabled {
            return;
        }
        let open = !self.is_open();
        self.set_open_state(open, open);
    }

    /// Handles a key press. Returns `true` if the key was consumed.
    ///
    /// Presses with Ctrl, Alt, or Meta held are left to the host.
    pub fn key_down(&mut self, key: Key, modifiers: Modifiers) -> bool {
        if self.config.disabled
            || modifiers.intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META)
        {
            return false;
        }

        if key == Key::Backspace && self.config.mode.is_multiple() && self.input_value.is_empty() {
            if let Some(last) = self.values.last().cloned() {
                self.deselect_value(&last);
            }
            return true;
        }

        let open = self.is_open();
        match key {
            Key::Down | Key::Enter if !open => {
                if !self.options.is_empty() || self.config.mode == Mode::Single {
                    self.set_open_state(true, false);
                }
                return true;
            }
            Key::Space if !open => {
                self.set_open_state(true, false);
                return true;
            }
            Key::Escape => {
                if open {
                    self.set_open_state(false, false);
                }
                return open;
            }
            _ => {}
        }

        if !self.is_dropdown_visible() {
            return false;
        }
        match key {
            Key::Up | Key::Down => {
                let offset = if key == Key::Up { -1 } else { 1 };
                if let Some(idx) = self.active.step(&self.flat, offset) {
                    self.host.scroll_to_index(idx);
                    self.handle_backfill(idx);
                }
                true
            }
            Key::Enter => {
                if let Some(idx) = self.active.index() {
                    self.activate(idx, false);
                }
                true
            }
            _ => false,
        }
    }

    /// A dropdown row was clicked.
    pub fn click_option(&mut self, index: usize) {
        if self.config.disabled {
            return;
        }
        self.activate(index, true);
    }

    /// The pointer moved over a dropdown row.
    pub fn hover_option(&mut self, index: usize) {
        if self.flat.get(index).is_some_and(FlatItem::is_enabled_option) {
            self.active.set(Some(index));
        }
    }

    /// Selects `value`.
    ///
    /// Multi modes append it; single modes replace the value and close the dropdown.
    /// Disabled options and values already selected in a multi mode are ignored.
    pub fn select_value(&mut self, value: &RawValue) {
        if self.config.disabled || self.index.is_disabled(value) {
            return;
        }
        let multiple = self.config.mode.is_multiple();
        if multiple && self.values.contains(value) {
            return;
        }

        let last = self.values.last().cloned();
        self.fire_select(value);
        let next = if multiple {
            self.values.with_appended(value)
        } else {
            let reselect =
                last.as_ref() == Some(value) && self.backfill_value.as_ref() != Some(value);
            self.set_open_state(false, true);
            if reselect {
                return;
            }
            Vec::from([value.clone()])
        };
        self.fire_change(next);

        if self.config.auto_clear_search_value {
            let input = if self.config.mode.is_combobox() {
                self.index.lookup(value).label.clone()
            } else {
                String::new()
            };
            self.set_input_value(input, false);
        }
    }

    /// Removes `value`. Ignored while the widget or the option is disabled.
    pub fn deselect_value(&mut self, value: &RawValue) {
        if self.config.disabled || self.index.is_disabled(value) || !self.values.contains(value) {
            return;
        }
        let next = self.values.without(value);
        if self.config.mode.is_multiple() {
            let event = SelectEvent::Deselect {
                value: self.external_single(value),
                option: self.option_of(value),
            };
            self.events.push(event);
        }
        self.fire_change(next);
    }

    /// The clear affordance was activated.
    pub fn clear(&mut self) {
        if self.config.disabled {
            return;
        }
        if self.input_value.is_empty() && self.values.is_empty() {
            return;
        }
        if !self.values.is_empty() {
            self.fire_change(Vec::new());
        }
        self.set_open_state(false, true);
        self.set_input_value(String::new(), true);
    }

    /// The widget received focus at host time `now_ms`.
    ///
    /// Deferred work that came due before `now_ms` runs first, so a blur commit whose delay
    /// already passed is not cancelled.
    pub fn focus_in(&mut self, now_ms: u64) {
        if self.config.disabled {
            return;
        }
        self.advance_to(now_ms);
        self.timers.cancel(TimerKind::BlurCommit);
        if self.focused {
            return;
        }
        self.focused = true;
        if !self.config.mode.is_multiple() || !self.mouse_down {
            self.timers.schedule(TimerKind::Focus, FOCUS_DELAY_MS);
        }
    }

    /// The widget lost focus at host time `now_ms`.
    ///
    /// The blur is committed [`BLUR_DELAY_MS`] later unless focus returns first.
    pub fn focus_out(&mut self, now_ms: u64) {
        if self.config.disabled {
            return;
        }
        self.advance_to(now_ms);
        self.timers.schedule(TimerKind::BlurCommit, BLUR_DELAY_MS);
    }

    /// A pointer press started on the control body.
    pub fn mouse_down(&mut self) {
        self.mouse_down = true;
    }

    /// The pointer press ended or left the control body.
    pub fn mouse_up(&mut self) {
        self.mouse_down = false;
    }

    /// Moves platform focus into the select.
    pub fn focus(&mut self) {
        let target = self.focus_target();
        self.host.focus(target);
    }

    /// Removes platform focus from the select.
    pub fn blur(&mut self) {
        let target = self.focus_target();
        self.host.blur(target);
    }

    // --- Internals -----------------------------------------------------------------------

    fn has_input(&self) -> bool {
        self.config.show_search || self.config.mode != Mode::Single
    }

    fn focus_target(&self) -> FocusTarget {
        if self.has_input() {
            FocusTarget::Input
        } else {
            FocusTarget::Selector
        }
    }

    fn external(&self, values: &[RawValue]) -> Option<SelectValue> {
        to_external_shape(
            values,
            self.config.label_in_value,
            self.config.mode.is_multiple(),
            |v| self.label_of(v),
        )
    }

    fn external_single(&self, value: &RawValue) -> SelectValue {
        to_external_single(value, self.config.label_in_value, |v| self.label_of(v))
    }

    fn combobox_input(&self, default_value: Option<&SelectValue>) -> String {
        let Some(first) = self.values.items().first() else {
            return String::new();
        };
        let prop = self
            .value_prop
            .as_ref()
            .or(default_value)
            .filter(|_| self.config.label_in_value);
        label_from_prop(prop, first).unwrap_or_else(|| self.label_of(first))
    }

    /// Recomputes the filtered rows and re-syncs the active row.
    fn refresh(&mut self) {
        let ctx = FilterContext {
            policy: &self.config.filter_option,
            filter_prop: &self.config.option_filter_prop,
            selected: self.values.items(),
            backfill: self.backfill_value.as_ref(),
            tags: self.config.mode.is_tags(),
        };
        self.visible = compute_visible(&self.input_value, &self.options, &ctx);
        self.flat = flatten(&self.visible);
        self.active.sync(
            &self.flat,
            &self.input_value,
            self.config.default_active_first_option,
        );
    }

    /// In single-value modes, points the active row at the selected value and scrolls to it.
    fn jump_to_selected(&mut self) {
        if self.config.mode.is_multiple() || self.values.len() != 1 {
            return;
        }
        let Some(selected) = self.values.items().first() else {
            return;
        };
        let position = self
            .flat
            .iter()
            .position(|item| item.option().is_some_and(|o| &o.value == selected));
        if let Some(idx) = position {
            self.active.set(Some(idx));
            self.host.scroll_to_index(idx);
        }
    }

    fn set_input_value(&mut self, text: String, fire_search: bool) {
        if text == self.input_value {
            return;
        }
        if fire_search {
            self.events.push(SelectEvent::Search(text.clone()));
        }
        self.input_value = text;
        self.refresh();
    }

    fn set_open_state(&mut self, open: bool, need_focus: bool) {
        if self.is_open() == open {
            self.maybe_focus(open, need_focus);
            return;
        }
        tracing::debug!(open, controlled = self.open_prop.is_some(), "dropdown visibility");
        self.events.push(SelectEvent::DropdownVisibleChange(open));
        if self.open_prop.is_none() {
            self.open = open;
        }
        self.backfill_value = None;
        if !open && self.config.mode == Mode::Single && self.config.show_search {
            self.set_input_value(String::new(), false);
        }
        self.maybe_focus(open, need_focus);
        self.refresh();
        if open {
            self.jump_to_selected();
        }
    }

    fn maybe_focus(&mut self, open: bool, need_focus: bool) {
        if !(open || need_focus) {
            return;
        }
        let target = if self.has_input() && (open || self.config.mode != Mode::Single) {
            FocusTarget::Input
        } else {
            FocusTarget::Selector
        };
        if self.host.focused_target() != Some(target) {
            self.host.focus(target);
            self.focused = true;
        }
    }

    fn fire_select(&mut self, value: &RawValue) {
        let event = SelectEvent::Select {
            value: self.external_single(value),
            option: self.option_of(value),
        };
        self.events.push(event);
    }

    /// Reports `next` as the new value and applies it unless the value is controlled.
    fn fire_change(&mut self, next: Vec<RawValue>) {
        let value = self.external(&next);
        let options = next.iter().map(|v| self.option_of(v)).collect();
        tracing::debug!(
            values = next.len(),
            controlled = self.is_value_controlled(),
            "value change"
        );
        self.events.push(SelectEvent::Change { value, options });
        if !self.is_value_controlled() {
            self.values.replace_with(next);
            self.refresh();
        }
    }

    /// Resolves separator-split input into values, emitting `Select` for each new one.
    ///
    /// Returns `None` when nothing new was added.
    fn value_by_input(&mut self, text: &str) -> Option<Vec<RawValue>> {
        let pieces = split_by_separators(text, self.config.token_separators.as_slice());
        let mut next = self.values.items().to_vec();
        let mut added = false;
        for piece in pieces {
            let candidate = if self.config.mode.is_tags() {
                RawValue::Text(piece)
            } else {
                match self.index.value_by_label(&piece) {
                    Some(value) if !self.index.is_disabled(&value) => value,
                    _ => continue,
                }
            };
            if next.contains(&candidate) {
                continue;
            }
            self.fire_select(&candidate);
            next.push(candidate);
            added = true;
        }
        added.then_some(next)
    }

    /// Enter on, or a click on, dropdown row `index`.
    fn activate(&mut self, index: usize, clicked: bool) {
        let Some(option) = self.flat.get(index).and_then(FlatItem::option) else {
            return;
        };
        if option.disabled {
            return;
        }
        let value = option.value.clone();
        if self.config.mode.is_multiple() && self.values.contains(&value) {
            self.deselect_value(&value);
            if clicked && self.config.auto_clear_search_value {
                self.set_input_value(String::new(), false);
            }
        } else {
            self.select_value(&value);
        }
    }

    /// Keyboard highlight preview in single-value modes.
    fn handle_backfill(&mut self, index: usize) {
        if !self.config.backfill || self.config.mode.is_multiple() {
            return;
        }
        let Some(key) = self
            .flat
            .get(index)
            .and_then(FlatItem::option)
            .map(|o| o.value.clone())
        else {
            return;
        };
        if self.config.mode.is_combobox() {
            self.set_input_value(key.as_text().into_owned(), false);
        }
        if !self.is_value_controlled() {
            self.values.replace_with([key.clone()]);
        }
        self.backfill_value = Some(key.clone());
        self.refresh();
        let position = self
            .flat
            .iter()
            .position(|item| item.option().is_some_and(|o| o.value == key));
        self.active.set(position);
    }

    fn commit_blur(&mut self) {
        self.focused = false;
        let mut value = self.values.items().to_vec();
        let mode = self.config.mode;

        if mode == Mode::Single
            && self.config.show_search
            && !self.input_value.is_empty()
            && self.config.default_active_first_option
        {
            let first = self
                .flat
                .iter()
                .filter_map(FlatItem::option)
                .find(|o| !o.disabled)
                .map(|o| o.value.clone());
            if let Some(first) = first {
                let next = Vec::from([first]);
                if next != value {
                    value.clone_from(&next);
                    self.fire_change(next);
                }
            }
        } else if mode.is_multiple() && !self.input_value.is_empty() {
            let text = core::mem::take(&mut self.input_value);
            if self.mouse_down {
                self.events.push(SelectEvent::Search(String::new()));
            }
            self.refresh();
            if let Some(next) = self.value_by_input(&text) {
                value.clone_from(&next);
                self.fire_change(next);
            }
        }

        if mode.is_multiple() && self.mouse_down {
            self.maybe_focus(true, true);
            self.mouse_down = false;
            tracing::debug!("blur commit kept focus for pointer press");
            return;
        }

        self.set_open_state(false, false);
        let blurred = self.external(&value);
        tracing::debug!("blur committed");
        self.events.push(SelectEvent::Blur(blurred));
    }
}
