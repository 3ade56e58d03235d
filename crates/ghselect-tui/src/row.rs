// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use ghselect_app::{DisplayItem, Visibility};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const TITLE_WIDTH: usize = 40;
pub const DESCRIPTION_MAX_CHARS: usize = 50;
const DESCRIPTION_KEEP_CHARS: usize = 47;
const DESCRIPTION_ELLIPSIS: &str = "...";
const TITLE_ELLIPSIS: char = '…';

pub const ROW_LINES: u16 = 2;
pub const ROW_SPACING: u16 = 1;
pub const ROW_HEIGHT: u16 = ROW_LINES + ROW_SPACING;

const HIGHLIGHT_MARKER: &str = "│ ";
const PLAIN_MARKER: &str = "  ";

// Tokyo Night
pub(crate) const COLOR_PRIMARY: Color = Color::Rgb(0x7a, 0xa2, 0xf7);
pub(crate) const COLOR_SECONDARY: Color = Color::Rgb(0xbb, 0x9a, 0xf7);
pub(crate) const COLOR_ACCENT: Color = Color::Rgb(0xff, 0x00, 0x7c);
pub(crate) const COLOR_SUCCESS: Color = Color::Rgb(0x9e, 0xce, 0x6a);
pub(crate) const COLOR_BG: Color = Color::Rgb(0x1a, 0x1b, 0x26);
pub(crate) const COLOR_FG: Color = Color::Rgb(0xc0, 0xca, 0xf5);
pub(crate) const COLOR_DIM: Color = Color::Rgb(0x56, 0x5f, 0x89);

pub fn truncate_description(text: &str) -> String {
    if text.chars().count() > DESCRIPTION_MAX_CHARS {
        let kept = text.chars().take(DESCRIPTION_KEEP_CHARS).collect::<String>();
        format!("{kept}{DESCRIPTION_ELLIPSIS}")
    } else {
        text.to_owned()
    }
}

/// Pads or cuts a title to exactly `TITLE_WIDTH` characters.
pub fn title_column(title: &str) -> String {
    if title.chars().count() > TITLE_WIDTH {
        let mut kept = title.chars().take(TITLE_WIDTH - 1).collect::<String>();
        kept.push(TITLE_ELLIPSIS);
        kept
    } else {
        format!("{title:<width$}", width = TITLE_WIDTH)
    }
}

/// Privacy glyph shown ahead of a repository title.
pub fn privacy_glyph(badge: Visibility) -> &'static str {
    match badge {
        Visibility::Private => "🔒",
        Visibility::Public => "🌐",
    }
}

fn badge_style(badge: Visibility) -> Style {
    let background = match badge {
        Visibility::Private => COLOR_DIM,
        Visibility::Public => COLOR_SUCCESS,
    };
    Style::default()
        .fg(COLOR_BG)
        .bg(background)
        .add_modifier(Modifier::BOLD)
}

/// Formats one list entry as a title line and a description line. The
/// output depends only on the arguments; a `width` of zero skips clipping.
pub fn render_row<T: DisplayItem + ?Sized>(
    item: &T,
    highlighted: bool,
    width: u16,
) -> Vec<Line<'static>> {
    let (marker, marker_style, title_style) = if highlighted {
        (
            HIGHLIGHT_MARKER,
            Style::default().fg(COLOR_ACCENT),
            Style::default()
                .fg(COLOR_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (PLAIN_MARKER, Style::default(), Style::default().fg(COLOR_FG))
    };

    let badge = item.badge();
    let mut head = vec![Span::styled(marker, marker_style)];
    if let Some(badge) = badge {
        head.push(Span::raw(format!("{} ", privacy_glyph(badge))));
    }
    head.push(Span::styled(title_column(item.title()), title_style));
    if let Some(badge) = badge {
        head.push(Span::raw(" "));
        head.push(Span::styled(format!(" {} ", badge.label()), badge_style(badge)));
    }

    let body = vec![
        Span::styled(marker, marker_style),
        Span::styled(
            format!("  {}", truncate_description(item.description())),
            Style::default().fg(COLOR_DIM),
        ),
    ];

    vec![clip_line(head, width), clip_line(body, width)]
}

fn clip_line(spans: Vec<Span<'static>>, width: u16) -> Line<'static> {
    if width == 0 {
        return Line::from(spans);
    }

    let mut remaining = usize::from(width);
    let mut clipped = Vec::with_capacity(spans.len());
    for span in spans {
        if remaining == 0 {
            break;
        }
        let len = span.content.width();
        if len <= remaining {
            remaining -= len;
            clipped.push(span);
        } else {
            let mut cut = String::new();
            for ch in span.content.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if ch_width > remaining {
                    break;
                }
                remaining -= ch_width;
                cut.push(ch);
            }
            if !cut.is_empty() {
                clipped.push(Span::styled(cut, span.style));
            }
            remaining = 0;
        }
    }
    Line::from(clipped)
}

pub(crate) fn line_text(line: &Line<'_>) -> String {
    line.spans
        .iter()
        .map(|span| span.content.as_ref())
        .collect()
}
