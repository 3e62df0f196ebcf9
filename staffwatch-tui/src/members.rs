//! Project members as table rows.

use staffgrid::{CellValue, Choice, Column, ColumnWidth, FieldPath, Record, Role, Span, Style};
use staffwatch_lib::model::{ProjectMember, ProjectRole};

#[derive(Debug, Clone, PartialEq)]
pub struct MemberRow(pub ProjectMember);

impl MemberRow {
    pub fn id(&self) -> &str {
        &self.0.id
    }
}

impl Record for MemberRow {
    fn field(&self, path: &FieldPath) -> CellValue {
        let member = &self.0;
        let text = match path.as_str() {
            "id" => member.id.clone(),
            "user.name" => member.user.name.clone(),
            "user.email" => member.user.email.clone(),
            "role" => member.role.label().to_string(),
            "status" => member.status.clone(),
            // RFC 3339 sorts chronologically as text
            "createdAt" => member.created_at.to_rfc3339(),
            _ => return CellValue::Missing,
        };
        CellValue::Text(text)
    }
}

pub fn row_key(row: &MemberRow, _index: usize) -> String {
    row.0.id.clone()
}

pub fn columns() -> Vec<Column<MemberRow>> {
    vec![
        Column::new("Name", "user.name").sortable().width(ColumnWidth::Percent(28)),
        Column::new("Email", "user.email").sortable(),
        Column::new("Role", "role")
            .sortable()
            .width(ColumnWidth::Fixed(10))
            .render(|_: &CellValue, row: &MemberRow, _: usize| role_span(row.0.role)),
        Column::new("Status", "status")
            .sortable()
            .width(ColumnWidth::Fixed(10))
            .render(|_: &CellValue, row: &MemberRow, _: usize| status_span(&row.0.status)),
        Column::new("Joined", "createdAt")
            .sortable()
            .width(ColumnWidth::Fixed(12))
            .render(|_: &CellValue, row: &MemberRow, _: usize| {
                Span::new(row.0.created_at.format("%Y-%m-%d").to_string())
            }),
    ]
}

fn role_span(role: ProjectRole) -> Span {
    let style = match role {
        ProjectRole::Owner => Style::new().fg(Role::Primary).bold(),
        ProjectRole::Manager => Style::new().fg(Role::Primary),
        ProjectRole::Member => Style::new(),
        ProjectRole::Viewer => Style::new().fg(Role::Muted),
    };
    Span::styled(role.label(), style)
}

fn status_span(status: &str) -> Span {
    let style = match status {
        "active" => Style::new().fg(Role::Success),
        "suspended" | "removed" => Style::new().fg(Role::Danger),
        _ => Style::new().fg(Role::Muted),
    };
    Span::styled(status, style)
}

/// A role as an option of the role filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleChoice(pub ProjectRole);

impl Choice for RoleChoice {
    fn id(&self) -> String {
        self.0.as_str().to_string()
    }

    fn label(&self) -> String {
        self.0.label().to_string()
    }
}

pub fn role_choices() -> Vec<RoleChoice> {
    ProjectRole::ALL.into_iter().map(RoleChoice).collect()
}
