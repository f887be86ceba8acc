use crate::config::TrellisConfig;

/// Lowercases the input and collapses every run of non-alphanumeric
/// characters into a single delimiter. Leading and trailing runs are
/// dropped entirely.
///
/// ```
/// use trellis_core::context::normalize;
///
/// assert_eq!(normalize("Admin Dashboard!", "."), "admin.dashboard");
/// assert_eq!(normalize("BlogAdmin", "-"), "blogadmin");
/// assert_eq!(normalize("__spaced__out__", "-"), "spaced-out");
/// ```
pub fn normalize(input: &str, delimiter: &str) -> String {
    input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(delimiter)
}

/// Snapshot of one visited blueprint's own (already normalized) segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceFrame {
    pub key: String,
    pub ident: String,
    pub name: String,
    pub view: String,
    pub prefix: String,
}

/// Values accumulated along one root-to-node path of a registration walk.
///
/// Each visited node appends its route-name, view-name and prefix segments
/// (joined with the configured delimiters) plus a [`TraceFrame`] recording
/// the visit. Parents hand children a clone, so composition only ever
/// appends; a child never reaches back into its parent's context.
#[derive(Debug, Clone, Default)]
pub struct Context {
    name: String,
    view: String,
    prefix: String,
    trace: Vec<TraceFrame>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Composed route name, e.g. `admin.dashboard.stats`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Composed view name, e.g. `admin.dashboard.stats`.
    pub fn view(&self) -> &str {
        &self.view
    }

    /// Composed URL prefix, e.g. `admin/dashboard/stats`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Appends one node's segments and its trace frame.
    pub fn push(&mut self, frame: TraceFrame, config: &TrellisConfig) {
        push_segment(&mut self.name, &frame.name, &config.route_name_delimiter);
        push_segment(&mut self.view, &frame.view, &config.view_delimiter);
        push_segment(&mut self.prefix, &frame.prefix, &config.url_delimiter);
        self.trace.push(frame);
    }

    pub fn trace(&self) -> &[TraceFrame] {
        &self.trace
    }

    pub fn last(&self) -> Option<&TraceFrame> {
        self.trace.last()
    }

    pub fn penultimate(&self) -> Option<&TraceFrame> {
        self.trace.len().checked_sub(2).map(|i| &self.trace[i])
    }

    /// Whether the node with the given key opened this walk.
    pub fn is_first(&self, key: &str) -> bool {
        self.trace.first().is_some_and(|frame| frame.key == key)
    }

    pub fn depth(&self) -> usize {
        self.trace.len()
    }
}

fn push_segment(acc: &mut String, segment: &str, delimiter: &str) {
    if segment.is_empty() {
        return;
    }
    if !acc.is_empty() {
        acc.push_str(delimiter);
    }
    acc.push_str(segment);
}
