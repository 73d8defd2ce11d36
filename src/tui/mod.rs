// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The interactive card-map shell (ratatui + crossterm): keyboard actions,
//! mouse drag-reorder, fuzzy title search, and a built-in demo outline.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Paragraph, Widget},
};

use crate::drag::{DragController, DragOutcome, MoveFeedback};
use crate::format::parse_outline;
use crate::layout::{
    cards::{layout_outline, LayoutOptions, OutlineLayout},
    geometry::{Point, SurfaceTransform},
};
use crate::model::ids::{NodeId, NodeIdGen};
use crate::model::node::{Node, Outline};
use crate::ops::{self, Action};
use crate::query;
use crate::render::{build_scene, DragOverlay, Scene, TextMeasure};
use crate::store::DocumentStore;
use crate::ui::{FrameFlag, UiState};

use theme::{TuiTheme, CARD_COLORS};

mod theme;

const TOAST_DURATION: Duration = Duration::from_secs(2);
const SCROLL_STEP: f64 = 3.0;
const RESIZE_STEP: i32 = 4;
const MIN_RESIZE_WIDTH: i32 = 8;
const MAX_RESIZE_WIDTH: i32 = 80;
// rapidfuzz ratios are normalized to [0.0, 1.0].
const FUZZY_CUTOFF: f64 = 0.3;

/// Runs the interactive terminal UI against a document store.
pub fn run(store: DocumentStore) -> Result<(), Box<dyn Error>> {
    let app = App::new(store)?;
    run_app(app)
}

/// Runs the interactive terminal UI on the built-in demo outline.
pub fn run_demo() -> Result<(), Box<dyn Error>> {
    run_app(App::demo())
}

fn run_app(mut app: App) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;

    while !app.should_quit {
        app.expire_toast();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(..) => {
                    let _ = app.frame.invalidate();
                }
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    if app.frame.run_frame() {
        app.relayout();
    }

    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let scene = app.scene();
    frame.render_widget(SceneWidget { scene: &scene, theme: &app.theme }, chunks[0]);
    frame.render_widget(Paragraph::new(app.footer_line()), chunks[1]);
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    is_error: bool,
    expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchMode {
    Inactive,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavDirection {
    Up,
    Down,
    Parent,
    Child,
}

struct App {
    store: Option<DocumentStore>,
    outline: Outline,
    id_gen: NodeIdGen,
    ui: UiState,
    drag: DragController,
    frame: FrameFlag,
    layout: OutlineLayout,
    options: LayoutOptions,
    measure: TextMeasure,
    theme: TuiTheme,
    toast: Option<Toast>,
    search_mode: SearchMode,
    search_query: String,
    search_results: Vec<NodeId>,
    search_index: usize,
    dirty_doc: bool,
    should_quit: bool,
}

impl App {
    fn new(store: DocumentStore) -> Result<Self, Box<dyn Error>> {
        let (outline, id_gen) = store.load()?;
        Ok(Self::with_document(outline, id_gen, Some(store)))
    }

    fn demo() -> Self {
        let (outline, id_gen) = parse_outline(DEMO_OUTLINE).into_parts();
        Self::with_document(outline, id_gen, None)
    }

    fn with_document(outline: Outline, id_gen: NodeIdGen, store: Option<DocumentStore>) -> Self {
        let options = LayoutOptions::default();
        let measure = TextMeasure::default();
        let layout = layout_outline(&outline, &measure, &options);
        let mut ui = UiState::default();
        ui.set_selection(outline.roots().first().map(|root| root.id().clone()));

        Self {
            store,
            outline,
            id_gen,
            ui,
            drag: DragController::new(),
            frame: FrameFlag::default(),
            layout,
            options,
            measure,
            theme: TuiTheme::from_env(),
            toast: None,
            search_mode: SearchMode::Inactive,
            search_query: String::new(),
            search_results: Vec::new(),
            search_index: 0,
            dirty_doc: false,
            should_quit: false,
        }
    }

    fn transform(&self) -> SurfaceTransform {
        SurfaceTransform::new(self.ui.pan())
    }

    fn relayout(&mut self) {
        self.layout = layout_outline(&self.outline, &self.measure, &self.options);
    }

    fn invalidate(&mut self) {
        // The 250ms poll loop redraws on its own; only the dirty bit matters.
        let _ = self.frame.invalidate();
    }

    fn scene(&self) -> Scene {
        let overlay = self.drag.dragged().map(|id| {
            DragOverlay::new(
                id.clone(),
                self.drag.drag_offset().unwrap_or(Point::new(0.0, 0.0)),
                self.drag.intent().map(|intent| intent.placeholder()),
            )
        });
        build_scene(
            &self.outline,
            &self.layout,
            &self.options,
            self.transform(),
            self.ui.selection(),
            overlay.as_ref(),
        )
    }

    fn selected_node(&self) -> Option<&Node> {
        let id = self.ui.selection()?;
        query::find_node(&self.outline, id)
    }

    fn apply(&mut self, action: Action) {
        match ops::apply_action(&mut self.outline, &mut self.id_gen, &action) {
            ops::ActionOutcome::Applied { created } => {
                self.dirty_doc = true;
                if let Some(created) = created {
                    self.ui.set_selection(Some(created));
                }
                self.invalidate();
            }
            ops::ActionOutcome::Selected(id) => {
                self.ui.set_selection(Some(id));
            }
            ops::ActionOutcome::NoEffect => {
                self.set_toast("Nothing to do", false);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.search_mode == SearchMode::Editing {
            self.handle_search_key(key.code);
            return;
        }
        self.handle_key_code(key.code);
    }

    fn handle_key_code(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('w') => self.save(),
            KeyCode::Char('o') => {
                if let Some(id) = self.ui.selection().cloned() {
                    self.apply(Action::AddSibling { id });
                } else {
                    let created = ops::insert_root(&mut self.outline, &mut self.id_gen, "New card");
                    self.dirty_doc = true;
                    self.ui.set_selection(Some(created));
                    self.invalidate();
                }
            }
            KeyCode::Char('O') => {
                if let Some(id) = self.ui.selection().cloned() {
                    self.apply(Action::AddChild { id });
                }
            }
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Tab => self.toggle_collapse(),
            KeyCode::Char('c') => self.cycle_color(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.resize_selected(RESIZE_STEP),
            KeyCode::Char('-') => self.resize_selected(-RESIZE_STEP),
            KeyCode::Char('/') => {
                self.search_mode = SearchMode::Editing;
                self.search_query.clear();
                self.search_results.clear();
                self.search_index = 0;
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(NavDirection::Up),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(NavDirection::Down),
            KeyCode::Left | KeyCode::Char('h') => self.move_selection(NavDirection::Parent),
            KeyCode::Right | KeyCode::Char('l') => self.move_selection(NavDirection::Child),
            KeyCode::Esc => {
                if self.drag.is_dragging() {
                    let _ = self.drag.cancel();
                    self.invalidate();
                } else {
                    self.ui.set_selection(None);
                }
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.search_mode = SearchMode::Inactive;
                self.search_query.clear();
                self.search_results.clear();
            }
            KeyCode::Enter => {
                if let Some(id) = self.search_results.get(self.search_index).cloned() {
                    self.apply(Action::Select { id });
                }
                self.search_mode = SearchMode::Inactive;
            }
            KeyCode::Backspace => {
                self.search_query.pop();
                self.update_search_results();
            }
            KeyCode::Down | KeyCode::Tab => {
                if !self.search_results.is_empty() {
                    self.search_index = (self.search_index + 1) % self.search_results.len();
                }
            }
            KeyCode::Up => {
                if !self.search_results.is_empty() {
                    self.search_index =
                        (self.search_index + self.search_results.len() - 1) % self.search_results.len();
                }
            }
            KeyCode::Char(ch) => {
                self.search_query.push(ch);
                self.update_search_results();
            }
            _ => {}
        }
    }

    fn update_search_results(&mut self) {
        self.search_index = 0;
        let needle = self.search_query.trim();
        if needle.is_empty() {
            self.search_results.clear();
            return;
        }

        let mut scored: Vec<(i64, NodeId)> = query::visible_nodes(&self.outline)
            .into_iter()
            .filter_map(|node| {
                fuzzy_score(needle, node.title()).map(|score| (score, node.id().clone()))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        self.search_results = scored.into_iter().map(|(_, id)| id).collect();
    }

    fn move_selection(&mut self, direction: NavDirection) {
        let visible: Vec<NodeId> = query::visible_nodes(&self.outline)
            .into_iter()
            .map(|node| node.id().clone())
            .collect();
        if visible.is_empty() {
            return;
        }

        let Some(current) = self.ui.selection().cloned() else {
            self.ui.set_selection(visible.first().cloned());
            return;
        };

        let next = match direction {
            NavDirection::Up | NavDirection::Down => {
                let Some(index) = visible.iter().position(|id| id == &current) else {
                    self.ui.set_selection(visible.first().cloned());
                    return;
                };
                match direction {
                    NavDirection::Up => index.checked_sub(1).map(|i| visible[i].clone()),
                    _ => visible.get(index + 1).cloned(),
                }
            }
            NavDirection::Parent => query::parent_chain(&self.outline, &current)
                .last()
                .map(|parent| parent.id().clone()),
            NavDirection::Child => query::find_node(&self.outline, &current)
                .filter(|node| !node.collapsed())
                .and_then(|node| node.children().first())
                .map(|child| child.id().clone()),
        };

        if let Some(next) = next {
            self.ui.set_selection(Some(next));
        }
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.ui.selection().cloned() else {
            self.set_toast("No card selected", false);
            return;
        };
        let fallback = query::parent_chain(&self.outline, &id)
            .last()
            .map(|parent| parent.id().clone());
        self.apply(Action::Delete { id });
        self.ui.set_selection(fallback);
    }

    fn toggle_collapse(&mut self) {
        let Some(node) = self.selected_node() else {
            self.set_toast("No card selected", false);
            return;
        };
        if node.children().is_empty() {
            self.set_toast("No children to fold", false);
            return;
        }
        let id = node.id().clone();
        let action = if node.collapsed() {
            Action::Expand { id }
        } else {
            Action::Collapse { id }
        };
        self.apply(action);
    }

    fn cycle_color(&mut self) {
        let Some(node) = self.selected_node() else {
            self.set_toast("No card selected", false);
            return;
        };
        let id = node.id().clone();
        let next = match node.color() {
            None => Some(CARD_COLORS[0].to_owned()),
            Some(current) => CARD_COLORS
                .iter()
                .position(|name| *name == current)
                .and_then(|index| CARD_COLORS.get(index + 1))
                .map(|name| (*name).to_owned()),
        };
        self.apply(Action::ChangeColor { id, color: next });
    }

    fn resize_selected(&mut self, delta: i32) {
        let Some(node) = self.selected_node() else {
            self.set_toast("No card selected", false);
            return;
        };
        let id = node.id().clone();
        let current = i32::from(node.width().unwrap_or(24));
        let width = (current + delta).clamp(MIN_RESIZE_WIDTH, MAX_RESIZE_WIDTH) as u16;
        self.apply(Action::Resize { id, width: Some(width) });
    }

    fn save(&mut self) {
        let Some(store) = self.store.as_ref() else {
            self.set_toast("Demo outline has no file to save to", true);
            return;
        };
        match store.save(&self.outline) {
            Ok(()) => {
                self.dirty_doc = false;
                self.set_toast(format!("Wrote {}", store.path().display()), false);
            }
            Err(err) => self.set_toast(format!("Save failed: {err}"), true),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let point = self
            .transform()
            .from_surface(Point::new(f64::from(mouse.column), f64::from(mouse.row)));

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag.on_pointer_down(point, &self.outline, &self.layout);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                match self.drag.on_pointer_move(point, &self.outline, &self.layout) {
                    MoveFeedback::None => {}
                    MoveFeedback::Visual => self.invalidate(),
                    MoveFeedback::Pan { dx, dy } => self.ui.pan_by(dx, dy),
                }
            }
            MouseEventKind::Up(MouseButton::Left) => match self.drag.on_pointer_up(point) {
                DragOutcome::None => {}
                DragOutcome::Click(id) => self.apply(Action::Select { id }),
                DragOutcome::Revert(_) => self.invalidate(),
                DragOutcome::Drop { id, target, mode, position } => {
                    self.commit_drop(id, target, mode, position);
                }
            },
            MouseEventKind::ScrollUp => self.ui.pan_by(0.0, SCROLL_STEP),
            MouseEventKind::ScrollDown => self.ui.pan_by(0.0, -SCROLL_STEP),
            MouseEventKind::ScrollLeft => self.ui.pan_by(SCROLL_STEP, 0.0),
            MouseEventKind::ScrollRight => self.ui.pan_by(-SCROLL_STEP, 0.0),
            _ => {}
        }
    }

    /// Applies the single structural mutation of a drag gesture, then pans
    /// so the dropped card stays under the pointer instead of jumping.
    fn commit_drop(
        &mut self,
        id: NodeId,
        target: NodeId,
        mode: ops::MoveMode,
        position: ops::MovePosition,
    ) {
        let before = self.layout.placement(&id).map(|placement| placement.card());
        self.apply(Action::Reorder { id: id.clone(), target, mode, position });
        self.relayout();
        let after = self.layout.placement(&id).map(|placement| placement.card());
        if let (Some(before), Some(after)) = (before, after) {
            self.ui.pan_by(before.x() - after.x(), before.y() - after.y());
        }
    }

    fn set_toast(&mut self, message: impl Into<String>, is_error: bool) {
        self.toast = Some(Toast {
            message: message.into(),
            is_error,
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    fn expire_toast(&mut self) {
        if self.toast.as_ref().is_some_and(|toast| toast.expires_at <= Instant::now()) {
            self.toast = None;
        }
    }

    fn footer_line(&self) -> Line<'static> {
        if self.search_mode == SearchMode::Editing {
            let hits = if self.search_results.is_empty() {
                "no match".to_owned()
            } else {
                format!("{}/{}", self.search_index + 1, self.search_results.len())
            };
            return Line::from(vec![
                Span::styled("/", self.theme.footer_key_style()),
                Span::raw(self.search_query.clone()),
                Span::raw("▏ "),
                Span::styled(format!("({hits})"), self.theme.base_style()),
            ]);
        }

        let mut spans = Vec::new();
        let doc_name = match self.store.as_ref() {
            Some(store) => store.path().display().to_string(),
            None => "demo".to_owned(),
        };
        let marker = if self.dirty_doc { "*" } else { "" };
        spans.push(Span::raw(format!(" {doc_name}{marker} ")));

        if let Some(toast) = self.toast.as_ref() {
            let style = if toast.is_error {
                self.theme.error_style()
            } else {
                self.theme.base_style()
            };
            spans.push(Span::styled(toast.message.clone(), style));
            return Line::from(spans);
        }

        if let Some(node) = self.selected_node() {
            let path: Vec<String> = query::parent_chain(&self.outline, node.id())
                .iter()
                .map(|ancestor| ancestor.title().to_owned())
                .chain(std::iter::once(node.title().to_owned()))
                .collect();
            spans.push(Span::raw(format!("{} ", path.join(" ▸ "))));
        }

        for (key, label) in [
            ("o", "sib"),
            ("O", "child"),
            ("d", "del"),
            ("⇥", "fold"),
            ("c", "color"),
            ("/", "find"),
            ("w", "save"),
            ("q", "quit"),
        ] {
            spans.push(Span::styled(key, self.theme.footer_key_style()));
            spans.push(Span::raw(format!(":{label} ")));
        }
        Line::from(spans)
    }
}

fn fuzzy_score(needle: &str, haystack: &str) -> Option<i64> {
    let ratio = rapidfuzz::fuzz::ratio(
        needle.to_lowercase().chars(),
        haystack.to_lowercase().chars(),
    );
    if ratio < FUZZY_CUTOFF {
        return None;
    }
    let mut score = (ratio * 1000.0).round() as i64;
    if haystack.to_lowercase().contains(&needle.to_lowercase()) {
        score += 100_000;
    }
    Some(score)
}

struct SceneWidget<'a> {
    scene: &'a Scene,
    theme: &'a TuiTheme,
}

impl Widget for SceneWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for segment in self.scene.segments() {
            draw_segment(buf, area, segment, self.theme);
        }
        for card in self.scene.cards() {
            draw_card(buf, area, card, self.theme);
        }
        if let Some(placeholder) = self.scene.placeholder() {
            let style = self.theme.placeholder_style();
            let y = placeholder.top().round() as i32;
            let x0 = placeholder.left().round() as i32;
            let x1 = placeholder.right().round() as i32;
            for x in x0..x1 {
                put(buf, area, x, y, '━', style);
            }
        }
    }
}

fn draw_segment(
    buf: &mut Buffer,
    area: Rect,
    segment: &crate::render::SegmentVisual,
    theme: &TuiTheme,
) {
    let style = theme.connector_style(segment.in_path());
    let seg = segment.segment();
    if seg.is_horizontal() {
        let y = seg.start().y().round() as i32;
        let (x0, x1) = ordered(seg.start().x().round() as i32, seg.end().x().round() as i32);
        for x in x0..=x1 {
            put(buf, area, x, y, '─', style);
        }
    } else {
        let x = seg.start().x().round() as i32;
        let (y0, y1) = ordered(seg.start().y().round() as i32, seg.end().y().round() as i32);
        for y in y0..=y1 {
            put(buf, area, x, y, '│', style);
        }
    }
}

fn draw_card(buf: &mut Buffer, area: Rect, card: &crate::render::CardVisual, theme: &TuiTheme) {
    let style = theme.card_style(card.color(), card.selected(), card.in_path());
    let rect = card.rect();
    let x0 = rect.left().round() as i32;
    let y0 = rect.top().round() as i32;
    let w = (rect.width().round() as i32).max(2);
    let h = (rect.height().round() as i32).max(2);
    let x1 = x0 + w - 1;
    let y1 = y0 + h - 1;

    let heavy = card.stroke_weight().unwrap_or(1) >= 2;
    let (tl, tr, bl, br, hbar, vbar) = if heavy {
        ('╔', '╗', '╚', '╝', '═', '║')
    } else {
        ('┌', '┐', '└', '┘', '─', '│')
    };

    // Clear the interior so connectors never bleed through a card.
    for y in y0 + 1..y1 {
        for x in x0 + 1..x1 {
            put(buf, area, x, y, ' ', style);
        }
    }
    for x in x0 + 1..x1 {
        put(buf, area, x, y0, hbar, style);
        put(buf, area, x, y1, hbar, style);
    }
    for y in y0 + 1..y1 {
        put(buf, area, x0, y, vbar, style);
        put(buf, area, x1, y, vbar, style);
    }
    put(buf, area, x0, y0, tl, style);
    put(buf, area, x1, y0, tr, style);
    put(buf, area, x0, y1, bl, style);
    put(buf, area, x1, y1, br, style);

    let inner_w = (w - 4).max(0) as usize;
    for (index, line) in card.lines().iter().enumerate() {
        let y = y0 + 1 + index as i32;
        if y >= y1 {
            break;
        }
        for (offset, ch) in line.chars().take(inner_w).enumerate() {
            put(buf, area, x0 + 2 + offset as i32, y, ch, style);
        }
    }

    if card.hidden_children() > 0 {
        let badge = format!(" +{} ", card.hidden_children());
        let start = x1 - 1 - badge.chars().count() as i32;
        for (offset, ch) in badge.chars().enumerate() {
            put(buf, area, start + offset as i32, y1, ch, style);
        }
    }
}

fn ordered(a: i32, b: i32) -> (i32, i32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn put(buf: &mut Buffer, area: Rect, x: i32, y: i32, ch: char, style: Style) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u16, y as u16);
    if x >= area.width || y >= area.height {
        return;
    }
    buf.get_mut(area.x + x, area.y + y)
        .set_char(ch)
        .set_style(style);
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}

const DEMO_OUTLINE: &str = "\
# Ramify

A card-map editor for Markdown outlines.

## Navigate

Arrows or hjkl move the selection between cards.

## Restructure

Drag a card onto another: top edge inserts before, bottom edge after, the
middle reparents.

### Keyboard

o adds a sibling, O a child, d deletes, Tab folds.

## Style

c cycles the card color, + and - resize.

# Scratch
";
