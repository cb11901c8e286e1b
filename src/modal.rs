use log::debug;

use crate::models::content::Project;
use crate::page::Page;
use crate::render::{self, RenderContext};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open { project_id: String },
}

/// The project details overlay. Its element is created on first open and
/// reused for the rest of the session.
#[derive(Debug, Default)]
pub struct ModalController {
    state: ModalState,
    mounted: bool,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    pub fn open_project_id(&self) -> Option<&str> {
        match &self.state {
            ModalState::Open { project_id } => Some(project_id.as_str()),
            ModalState::Closed => None,
        }
    }

    /// Show `project_id` from the on-screen list. Unknown ids change nothing.
    /// Returns whether the overlay now shows that project.
    pub fn open(
        &mut self,
        project_id: &str,
        projects: &[Project],
        ctx: &RenderContext,
        page: &mut dyn Page,
    ) -> bool {
        let project = match projects.iter().find(|p| p.id == project_id) {
            Some(p) => p,
            None => {
                debug!("Ignoring open for unknown project id {:?}", project_id);
                return false;
            }
        };

        if !self.mounted {
            page.mount_modal();
            self.mounted = true;
        }
        page.set_modal_html(&render::modal::render(project, ctx));
        page.set_modal_visible(true);
        page.set_scroll_locked(true);
        page.focus_modal_close();

        self.state = ModalState::Open {
            project_id: project.id.clone(),
        };
        true
    }

    pub fn close(&mut self, page: &mut dyn Page) {
        if !self.is_open() {
            return;
        }
        page.set_modal_visible(false);
        page.set_scroll_locked(false);
        self.state = ModalState::Closed;
    }

    /// Re-render the open project, e.g. after a locale switch. Closes the
    /// overlay if that project is no longer on screen.
    pub fn refresh(&mut self, projects: &[Project], ctx: &RenderContext, page: &mut dyn Page) {
        let id = match self.open_project_id() {
            Some(id) => id.to_string(),
            None => return,
        };
        match projects.iter().find(|p| p.id == id) {
            Some(project) => page.set_modal_html(&render::modal::render(project, ctx)),
            None => self.close(page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::UiLabels;
    use crate::page::MemoryPage;

    fn projects() -> Vec<Project> {
        vec![
            Project { id: "a".into(), name: "Alpha <1>".into(), ..Default::default() },
            Project { id: "b".into(), name: "Beta".into(), ..Default::default() },
        ]
    }

    fn with_ctx<R>(f: impl FnOnce(&RenderContext) -> R) -> R {
        let ui = UiLabels::new();
        let ctx = RenderContext { locale: "en", ui: &ui, assets_dir: "assets" };
        f(&ctx)
    }

    #[test]
    fn test_starts_closed_without_element() {
        let modal = ModalController::new();
        assert_eq!(modal.state(), &ModalState::Closed);
        assert!(MemoryPage::new().modal_html.is_none());
    }

    #[test]
    fn test_open_known_project() {
        let mut modal = ModalController::new();
        let mut page = MemoryPage::new();
        let opened = with_ctx(|ctx| modal.open("a", &projects(), ctx, &mut page));
        assert!(opened);
        assert_eq!(modal.open_project_id(), Some("a"));
        assert!(page.modal_visible);
        assert!(page.scroll_locked);
        assert!(page.close_focused);
        assert!(page.modal_html.as_deref().unwrap().contains("Alpha &lt;1&gt;"));
    }

    #[test]
    fn test_open_unknown_while_closed_stays_closed() {
        let mut modal = ModalController::new();
        let mut page = MemoryPage::new();
        let opened = with_ctx(|ctx| modal.open("zzz", &projects(), ctx, &mut page));
        assert!(!opened);
        assert_eq!(modal.state(), &ModalState::Closed);
        assert!(page.modal_html.is_none());
        assert!(!page.scroll_locked);
    }

    #[test]
    fn test_open_unknown_while_open_keeps_prior_project() {
        let mut modal = ModalController::new();
        let mut page = MemoryPage::new();
        with_ctx(|ctx| {
            modal.open("b", &projects(), ctx, &mut page);
            modal.open("zzz", &projects(), ctx, &mut page);
        });
        assert_eq!(modal.open_project_id(), Some("b"));
        assert!(page.modal_html.as_deref().unwrap().contains("Beta"));
        assert!(page.modal_visible);
    }

    #[test]
    fn test_element_mounted_once() {
        let mut modal = ModalController::new();
        let mut page = MemoryPage::new();
        with_ctx(|ctx| {
            modal.open("a", &projects(), ctx, &mut page);
            modal.close(&mut page);
            modal.open("b", &projects(), ctx, &mut page);
        });
        assert_eq!(page.modal_mounts, 1);
        assert_eq!(modal.open_project_id(), Some("b"));
    }

    #[test]
    fn test_close_restores_scrolling() {
        let mut modal = ModalController::new();
        let mut page = MemoryPage::new();
        with_ctx(|ctx| modal.open("a", &projects(), ctx, &mut page));
        modal.close(&mut page);
        assert_eq!(modal.state(), &ModalState::Closed);
        assert!(!page.modal_visible);
        assert!(!page.scroll_locked);
        // Element survives closing.
        assert!(page.modal_html.is_some());
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let mut modal = ModalController::new();
        let mut page = MemoryPage::new();
        page.scroll_locked = true;
        modal.close(&mut page);
        assert_eq!(modal.state(), &ModalState::Closed);
        assert!(page.scroll_locked);
    }

    #[test]
    fn test_refresh_closes_when_project_gone() {
        let mut modal = ModalController::new();
        let mut page = MemoryPage::new();
        with_ctx(|ctx| {
            modal.open("a", &projects(), ctx, &mut page);
            modal.refresh(&projects()[1..], ctx, &mut page);
        });
        assert_eq!(modal.state(), &ModalState::Closed);
    }
}
