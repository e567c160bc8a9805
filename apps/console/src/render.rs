//! Markup fragments shared by every page. Each fragment is an askama
//! template; interpolated values are HTML-escaped unless marked `safe`, and
//! only already-rendered fragments are ever marked `safe`.

use askama::Template;

use crate::errors::AppError;

#[derive(Template)]
#[template(path = "row.html")]
struct TableRow<'a> {
    id: i64,
    cells: &'a [String],
}

struct SelectOption<'a> {
    value: i64,
    label: &'a str,
    selected: bool,
}

#[derive(Template)]
#[template(path = "options.html")]
struct SelectOptions<'a> {
    options: Vec<SelectOption<'a>>,
}

#[derive(Template)]
#[template(path = "resume_link.html")]
struct ResumeLink<'a> {
    href: Option<&'a str>,
}

/// A dashboard "recent" entry: primary line, secondary line, and `#id`.
pub struct RecentItem<'a> {
    pub id: i64,
    pub primary: &'a str,
    pub secondary: &'a str,
}

impl<'a> RecentItem<'a> {
    pub fn new(id: i64, primary: &'a str, secondary: &'a str) -> Self {
        Self {
            id,
            primary: if primary.is_empty() { "—" } else { primary },
            secondary,
        }
    }
}

#[derive(Template)]
#[template(path = "recent_list.html")]
struct RecentList<'a> {
    items: &'a [RecentItem<'a>],
}

pub struct FormInput<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

#[derive(Template)]
#[template(path = "form.html")]
pub struct FormView<'a> {
    pub mode: String,
    pub inputs: Vec<FormInput<'a>>,
    pub submit_label: &'a str,
    pub cancel_visible: bool,
}

#[derive(Template)]
#[template(path = "crud_page.html")]
pub struct CrudView<'a> {
    pub form: &'a str,
    pub label: &'a str,
    pub rows: &'a str,
}

#[derive(Template)]
#[template(path = "resume_panel.html")]
pub struct ResumePanelView<'a> {
    pub options: &'a str,
    pub link: &'a str,
    pub file: &'a str,
    pub label: &'a str,
    pub disabled: bool,
}

#[derive(Template)]
#[template(path = "applications_page.html")]
pub struct ApplicationsView<'a> {
    pub candidates: &'a str,
    pub jobs: &'a str,
    pub crud: &'a str,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardView<'a> {
    pub candidates: &'a str,
    pub jobs: &'a str,
    pub applications: &'a str,
    pub recent_candidates: &'a str,
    pub recent_jobs: &'a str,
}

/// One `<tr>` with the id cell, the text cells, and Edit/Delete buttons
/// addressed by `data-id` instead of inline handlers.
pub fn table_row(id: i64, cells: &[String]) -> Result<String, AppError> {
    Ok(TableRow { id, cells }.render()?)
}

pub fn select_options(
    options: &[(i64, String)],
    selected: Option<i64>,
) -> Result<String, AppError> {
    let options = options
        .iter()
        .map(|(value, label)| SelectOption {
            value: *value,
            label,
            selected: Some(*value) == selected,
        })
        .collect();
    Ok(SelectOptions { options }.render()?)
}

/// Link to a candidate's resume, or a `none` placeholder.
pub fn resume_link(href: Option<&str>) -> Result<String, AppError> {
    Ok(ResumeLink { href }.render()?)
}

pub fn recent_list(items: &[RecentItem<'_>]) -> Result<String, AppError> {
    Ok(RecentList { items }.render()?)
}
