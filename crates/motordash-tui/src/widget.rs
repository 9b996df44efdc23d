//! Custom widgets for the MOTORDASH TUI.
//!
//! The toast overlay is a pure function of (displayable alerts, per-toast
//! phase): toasts in the `Visible` phase render steady, toasts in the
//! `Dismissing` phase render dimmed to carry the exit animation. The
//! overlay owns no state; dismiss intents travel through key events.

use motordash_core::types::Alert;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::theme::Theme;
use crate::toast::ToastPhase;

/// Width of the toast column in the top-right corner.
const TOAST_WIDTH: u16 = 44;

/// Height of one toast card, borders included.
const TOAST_HEIGHT: u16 = 4;

/// Transient notification overlay for the top-right corner.
///
/// Renders newest-first so the most recent alert sits at the top of the
/// stack. Each card shows its 1-based position, which doubles as the
/// dismiss hotkey (digits 1-9).
pub struct ToastOverlay<'a> {
    toasts: Vec<(&'a Alert, ToastPhase)>,
    theme: &'a Theme,
}

impl<'a> ToastOverlay<'a> {
    /// Build an overlay from displayable alerts paired with their phase,
    /// given in display (insertion) order.
    pub fn new(toasts: Vec<(&'a Alert, ToastPhase)>, theme: &'a Theme) -> Self {
        Self { toasts, theme }
    }
}

impl Widget for ToastOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.toasts.is_empty() || area.width < TOAST_WIDTH + 2 {
            return;
        }

        let x = area.right().saturating_sub(TOAST_WIDTH + 1);
        let max_cards = (area.height.saturating_sub(2) / TOAST_HEIGHT) as usize;

        // Newest first: reverse display order, 1-based position follows
        // the rendered stack so the dismiss digits match what is on screen.
        for (slot, (alert, phase)) in self.toasts.iter().rev().take(max_cards).enumerate() {
            let y = area.top() + 1 + slot as u16 * TOAST_HEIGHT;
            let card = Rect::new(x, y, TOAST_WIDTH, TOAST_HEIGHT);

            let severity_color = self.theme.colors.severity(alert.severity);
            let (border_style, text_style) = match phase {
                ToastPhase::Visible => (
                    Style::default().fg(severity_color),
                    Style::default().fg(self.theme.colors.text),
                ),
                ToastPhase::Dismissing => (
                    Style::default()
                        .fg(self.theme.colors.border_dim)
                        .add_modifier(Modifier::DIM),
                    Style::default()
                        .fg(self.theme.colors.text_dim)
                        .add_modifier(Modifier::DIM),
                ),
            };

            let title = Line::from(vec![
                Span::styled(
                    format!(" [{}] ", slot + 1),
                    Style::default().fg(self.theme.colors.hotkey),
                ),
                Span::styled(
                    format!("{} {} ", alert.severity.icon(), alert.severity.label()),
                    Style::default()
                        .fg(severity_color)
                        .add_modifier(Modifier::BOLD),
                ),
            ]);

            let body = Paragraph::new(vec![
                Line::from(Span::styled(
                    format!("{} · {}", alert.machine_id, alert.alert_type),
                    text_style.add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(alert.message.clone(), text_style)),
            ])
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(title),
            );

            body.render(card, buf);
        }
    }
}
