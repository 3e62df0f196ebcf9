use serde_json::{Value, json};
use staffgrid::{
    Buffer, Column, ColumnWidth, DataTable, Rect, RowTarget, SelectionMap, TableHit, TableLayout,
    TableProps, TableView, Theme, render_table,
};

fn render_to_buffer(view: &TableView, width: u16, height: u16) -> (Buffer, TableLayout) {
    let mut buf = Buffer::new(width, height);
    let layout = render_table(view, Rect::new(0, 0, width, height), &mut buf, &Theme::default());
    (buf, layout)
}

fn table() -> DataTable<Value> {
    DataTable::new(vec![
        Column::new("Name", "name").sortable().width(ColumnWidth::Fixed(10)),
        Column::new("Age", "age").sortable().width(ColumnWidth::Fixed(8)),
        Column::new("Team", "team").width(ColumnWidth::Fixed(10)),
    ])
    .unwrap()
    .sortable(true)
    .selection(true)
    .row_key(|row: &Value, _| row["id"].as_str().unwrap_or_default().to_string())
}

fn data() -> Vec<Value> {
    vec![
        json!({"id": "a", "name": "Bob", "age": null, "team": "Ops"}),
        json!({"id": "b", "name": "ann", "age": 30, "team": ""}),
    ]
}

// ============================================================================
// Header
// ============================================================================

#[test]
fn header_shows_indicators_and_select_all() {
    let mut table = table();
    table.header_click(1);
    table.header_click(1);
    let data = data();
    let (buf, _) = render_to_buffer(&table.view(&TableProps::new(&data)), 32, 6);

    let header = buf.row_text(0);
    assert!(header.starts_with("[ ] "), "header: {header:?}");
    assert_eq!(header.chars().skip(4).take(10).collect::<String>(), "Name    ↕ ");
    assert!(header.contains("Age   ↓"), "header: {header:?}");
    assert!(header.contains("Team"), "header: {header:?}");
    assert!(buf.row_text(1).starts_with("────"));
}

#[test]
fn compact_skips_separator() {
    let table = table().compact();
    let data = data();
    let (buf, layout) = render_to_buffer(&table.view(&TableProps::new(&data)), 32, 6);
    assert!(buf.row_text(1).contains("Bob"));
    assert_eq!(layout.hit(5, 1), Some(TableHit::Row { position: 0, target: RowTarget::Cell(0) }));
}

// ============================================================================
// Body
// ============================================================================

#[test]
fn rows_render_values_and_placeholders() {
    let data = data();
    let (buf, _) = render_to_buffer(&table().view(&TableProps::new(&data)), 32, 6);
    let first = buf.row_text(2);
    let second = buf.row_text(3);
    assert!(first.starts_with("[ ] Bob       —       Ops"), "row: {first:?}");
    assert!(second.starts_with("[ ] ann       30      —"), "row: {second:?}");
}

#[test]
fn selected_rows_are_checked() {
    let data = data();
    let mut selection = SelectionMap::new();
    selection.insert("b", data[1].clone());
    let table = table();
    let props = TableProps::new(&data).selection(&selection);
    let (buf, _) = render_to_buffer(&table.view(&props), 32, 6);

    assert!(buf.row_text(0).starts_with("[-]"));
    assert!(buf.row_text(2).starts_with("[ ]"));
    assert!(buf.row_text(3).starts_with("[x]"));

    let theme = Theme::default();
    assert_eq!(buf.get(6, 3).unwrap().bg, theme.selection);
}

#[test]
fn long_values_truncate_with_ellipsis() {
    let data = vec![json!({"id": "x", "name": "Maximilian Longname", "age": 41})];
    let (buf, _) = render_to_buffer(&table().view(&TableProps::new(&data)), 32, 4);
    assert!(buf.row_text(2).contains("Maximili…"), "row: {:?}", buf.row_text(2));
}

#[test]
fn skeleton_rows_while_loading() {
    let data = data();
    let table = table().skeleton_rows(3);
    let (buf, layout) = render_to_buffer(&table.view(&TableProps::new(&data).loading(true)), 32, 8);
    for y in 2..5 {
        let row = buf.row_text(y);
        assert!(row.starts_with("░░░ ░░░░░░░░░ "), "row {y}: {row:?}");
        assert!(!row.contains("Bob"));
    }
    assert!(buf.row_text(5).trim().is_empty());
    assert_eq!(layout.hit(5, 2), None);
}

#[test]
fn empty_state_message() {
    let table = table().empty_message("No members found");
    let (buf, layout) = render_to_buffer(&table.view(&TableProps::new(&[])), 32, 4);
    assert_eq!(buf.row_text(2).trim(), "∅ No members found");
    assert_eq!(layout.visible_rows(), 0);
}

#[test]
fn rows_stop_at_area_bottom() {
    let data: Vec<Value> = (0..10).map(|i| json!({"id": i.to_string(), "name": format!("m{i}")})).collect();
    let (_, layout) = render_to_buffer(&table().view(&TableProps::new(&data)), 32, 5);
    assert_eq!(layout.visible_rows(), 3);
}

#[test]
fn empty_state_stays_inside_a_short_area() {
    let table = table().empty_message("No data available");
    let mut buf = Buffer::new(30, 4);
    render_table(&table.view(&TableProps::new(&[])), Rect::new(0, 0, 30, 2), &mut buf, &Theme::default());
    assert!(buf.row_text(0).contains("Name"));
    assert!(buf.row_text(2).trim().is_empty(), "row 2: {:?}", buf.row_text(2));
}

#[test]
fn cursor_below_the_fold_scrolls_into_view() {
    let data: Vec<Value> = (0..25).map(|i| json!({"id": i.to_string(), "name": format!("m{i}")})).collect();
    let view = table().view(&TableProps::new(&data)).with_cursor(Some(20));
    let (buf, layout) = render_to_buffer(&view, 32, 12);

    assert_eq!(layout.visible_rows(), 10);
    assert_eq!(layout.scroll(), 11);
    assert!(buf.row_text(2).starts_with("[ ] m11"), "{:?}", buf.row_text(2));
    assert!(buf.row_text(11).starts_with("[ ] m20"), "{:?}", buf.row_text(11));
    assert_eq!(layout.hit(5, 11), Some(TableHit::Row { position: 20, target: RowTarget::Cell(0) }));

    // moving back up keeps the window until the cursor leaves it
    let view = table()
        .view(&TableProps::new(&data))
        .with_cursor(Some(14))
        .with_scroll(layout.scroll());
    let (_, again) = render_to_buffer(&view, 32, 12);
    assert_eq!(again.scroll(), 11);
}

#[test]
fn bordered_table_insets_content() {
    let data = data();
    let table = table().bordered();
    let (buf, layout) = render_to_buffer(&table.view(&TableProps::new(&data)), 34, 7);
    assert!(buf.row_text(0).starts_with("┌──"));
    assert!(buf.row_text(1).starts_with("│[ ] Name"));
    assert!(buf.row_text(6).starts_with("└──"));
    assert_eq!(layout.hit(0, 3), None);
    assert_eq!(layout.hit(2, 3), Some(TableHit::Row { position: 0, target: RowTarget::Checkbox }));
}

// ============================================================================
// Hit testing
// ============================================================================

#[test]
fn hits_map_back_to_table_parts() {
    let data = data();
    let (_, layout) = render_to_buffer(&table().view(&TableProps::new(&data)), 32, 6);

    assert_eq!(layout.hit(1, 0), Some(TableHit::SelectAll));
    assert_eq!(layout.hit(5, 0), Some(TableHit::Header(0)));
    assert_eq!(layout.hit(15, 0), Some(TableHit::Header(1)));
    assert_eq!(layout.hit(5, 1), None);
    assert_eq!(layout.hit(0, 3), Some(TableHit::Row { position: 1, target: RowTarget::Checkbox }));
    assert_eq!(layout.hit(23, 2), Some(TableHit::Row { position: 0, target: RowTarget::Cell(2) }));
    assert_eq!(layout.hit(5, 4), None);

    // space right of the last column still belongs to the row
    let (_, wide) = render_to_buffer(&table().view(&TableProps::new(&data)), 36, 6);
    assert_eq!(wide.hit(34, 2), Some(TableHit::Row { position: 0, target: RowTarget::Row }));
}

#[test]
fn header_hit_drives_sort() {
    let data = data();
    let mut table = table();
    let (_, layout) = render_to_buffer(&table.view(&TableProps::new(&data)), 32, 6);
    let Some(TableHit::Header(col)) = layout.hit(15, 0) else {
        panic!("expected header hit");
    };
    table.header_click(col);
    let (buf, _) = render_to_buffer(&table.view(&TableProps::new(&data)), 32, 6);
    assert!(buf.row_text(2).starts_with("[ ] ann"));
}
