//! Frame layout.
//!
//! ```text
//! Staff members · offline fixture          ⌕ search
//! Role: All roles
//! ┌ table ─────────────────────────────────────────┐
//! └────────────────────────────────────────────────┘
//!  2 items selected │ 1 ✕ Remove  2 ⇩ Export │ ✕
//! Rows per page: 25 ▾   1–25 of 60   « ‹ › »
//! status / key help
//! ```

use staffgrid::{
    Buffer, Rect, ResultsStatus, Role, Style, Theme, render_bulk_bar, render_combobox,
    render_pagination, render_table,
};

use crate::app::{App, Layouts, Mode};

const HELP: &str = "↑↓ move  ←→ column  s sort  space select  a page  / search  r roles  n/p page  +/- rows  q quit";

pub fn draw(app: &App, source: &str, area: Rect, buf: &mut Buffer, theme: &Theme) -> Layouts {
    let mut layouts = Layouts::default();
    if area.height < 6 || area.width < 20 {
        buf.put_str(area.x, area.y, "Terminal too small", area.width, theme.brush(&Style::new()));
        return layouts;
    }

    let (title, rest) = area.split_top(1);
    let (filters, rest) = rest.split_top(1);
    let (rest, status) = rest.split_bottom(1);
    let (rest, pager) = rest.split_bottom(1);
    let (table, bulk) = if app.selection().is_empty() {
        (rest, Rect::new(rest.x, rest.bottom(), rest.width, 0))
    } else {
        rest.split_bottom(1)
    };

    draw_title(app, source, title, buf, theme);
    draw_filters(app, filters, buf, theme);

    layouts.table = render_table(&app.table_view(), table, buf, theme);
    layouts.bulk = render_bulk_bar(app.bulk(), app.selection().len(), bulk, buf, theme);
    if let Some(pagination) = app.pagination() {
        layouts.pagination = render_pagination(&pagination, pager, buf, theme);
    }

    let (text, style) = match app.status() {
        Some(message) => (message.to_string(), Style::new().fg(Role::Primary)),
        None if !app.busy().is_empty() => {
            let text = format!("◌ {} in progress…", app.busy().len());
            (text, Style::new().fg(Role::Muted))
        }
        None => (HELP.to_string(), Style::new().fg(Role::Muted)),
    };
    buf.put_str(status.x + 1, status.y, &text, status.width.saturating_sub(1), theme.brush(&style));

    if app.mode() == Mode::RoleFilter {
        let popover = Rect::new(filters.x + 6, filters.y + 1, 28.min(area.width - 6), 8.min(table.height));
        let roles = app.roles();
        let status = roles.status(app.role_items().len(), false, None);
        let cursor = matches!(status, ResultsStatus::Items).then_some(app.role_cursor());
        render_combobox(roles, app.role_items(), &status, cursor, popover, buf, theme);
    }

    layouts
}

fn draw_title(app: &App, source: &str, area: Rect, buf: &mut Buffer, theme: &Theme) {
    let title = Style::new().fg(Role::Primary).bold();
    let mut x = area.x + 1;
    x += buf.put_str(x, area.y, "Staff members", area.width.saturating_sub(1), theme.brush(&title));
    let muted = theme.brush(&Style::new().fg(Role::Muted));
    let suffix = if app.is_loading() {
        format!(" · {} · loading…", source)
    } else {
        format!(" · {}", source)
    };
    buf.put_str(x, area.y, &suffix, area.right().saturating_sub(x), muted);

    let searching = app.mode() == Mode::Search;
    let text = match (app.search_input().is_empty(), searching) {
        (true, false) => "⌕ / to search".to_string(),
        (_, true) => format!("⌕ {}▏", app.search_input()),
        (false, false) => format!("⌕ {}", app.search_input()),
    };
    let style = if searching {
        Style::new().bg(Role::Stripe)
    } else {
        Style::new().fg(Role::Muted)
    };
    let width = 30.min(area.width / 2);
    let start = area.right().saturating_sub(width + 1);
    buf.put_str(start, area.y, &text, width, theme.brush(&style));
}

fn draw_filters(app: &App, area: Rect, buf: &mut Buffer, theme: &Theme) {
    let mut x = area.x + 1;
    x += buf.put_str(x, area.y, "Role: ", area.width, theme.brush(&Style::new().fg(Role::Muted)));
    let roles = app.roles();
    let style = if roles.value().is_empty() {
        Style::new().fg(Role::Muted)
    } else {
        Style::new().fg(Role::Foreground).bold()
    };
    let trigger = format!("{} ▾", roles.trigger_text());
    buf.put_str(x, area.y, &trigger, area.right().saturating_sub(x), theme.brush(&style));
}
