/// Header styling of a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalClass {
    #[default]
    Primary,
    Danger,
}

impl ModalClass {
    pub fn css_class(self) -> &'static str {
        match self {
            ModalClass::Primary => "bg-primary text-white",
            ModalClass::Danger => "bg-danger text-white",
        }
    }
}

/// Paragraphs of the About dialog.
pub const ABOUT_PARAGRAPHS: &[&str] = &[
    "This is a simple implementation of a way to interact with the TfL cycling parking dataset.",
    "Designed by MrLemur",
    "Built with Rust and Python",
];

/// Author named in the About dialog, and where the name links to.
pub const ABOUT_AUTHOR: &str = "MrLemur";
pub const ABOUT_AUTHOR_URL: &str = "https://www.github.com/MrLemur";

/// Attribution lines shown under the About dialog.
pub const ABOUT_FOOTER: &[&str] = &[
    "Powered by TfL Open Data",
    "Contains OS data \u{a9} Crown copyright and database rights 2016 and Geomni UK Map data \u{a9} and database rights [2019]",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalBody {
    Text(String),
    About,
}

/// Content of the single app-wide dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalContent {
    pub title: String,
    pub body: ModalBody,
    pub class: ModalClass,
    /// Body rendered edge to edge (used by cards).
    pub no_padding: bool,
    pub show: bool,
}

impl ModalContent {
    pub fn hidden() -> Self {
        Self {
            title: String::new(),
            body: ModalBody::Text(String::new()),
            class: ModalClass::Primary,
            no_padding: false,
            show: false,
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: ModalBody::Text(body.into()),
            class: ModalClass::Danger,
            no_padding: false,
            show: true,
        }
    }

    pub fn about() -> Self {
        Self {
            title: "About".to_string(),
            body: ModalBody::About,
            class: ModalClass::Primary,
            no_padding: true,
            show: true,
        }
    }

    /// Same content, no longer visible.
    pub fn dismissed(mut self) -> Self {
        self.show = false;
        self
    }

    pub fn body_text(&self) -> String {
        match &self.body {
            ModalBody::Text(s) => s.clone(),
            ModalBody::About => ABOUT_PARAGRAPHS
                .iter()
                .chain(ABOUT_FOOTER)
                .copied()
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl Default for ModalContent {
    fn default() -> Self {
        Self::hidden()
    }
}
