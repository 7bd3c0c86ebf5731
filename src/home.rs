//! Page object for the POET workspace: the Gitpod dashboard, the workbench
//! it opens, and the TOC editor webview.
//!
//! Every accessor resolves its selector afresh; nothing is cached and nothing
//! is retried beyond the page's own auto-waiting. Ordering of calls is up to
//! the test driving the object.

use tracing::debug;

use crate::backend::Backend;
use crate::config::Timeouts;
use crate::error::Result;
use crate::locator::{FrameLocator, Locator};
use crate::page::Page;
use crate::selectors as sel;

pub struct HomePoet<'p, B: Backend> {
    page: &'p Page<B>,
    timeouts: Timeouts,
}

impl<'p, B: Backend> HomePoet<'p, B> {
    pub fn new(page: &'p Page<B>) -> Self {
        Self::with_timeouts(page, Timeouts::default())
    }

    pub fn with_timeouts(page: &'p Page<B>, timeouts: Timeouts) -> Self {
        Self { page, timeouts }
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    // ── Login / workspace start ─────────────────────────────────────

    pub fn github_login_button_locator(&self) -> Locator<'p, B> {
        self.page.locator(sel::GITHUB_LOGIN_BUTTON)
    }

    pub async fn github_login_button_is_visible(&self) -> Result<bool> {
        self.page.is_visible(sel::GITHUB_LOGIN_BUTTON).await
    }

    pub async fn click_github_login_button(&self) -> Result<()> {
        self.github_login_button_locator().click().await
    }

    pub fn workspace_continue_button(&self) -> Locator<'p, B> {
        self.page.locator(sel::WORKSPACE_CONTINUE_BUTTON)
    }

    pub async fn click_workspace_continue_button(&self) -> Result<()> {
        self.workspace_continue_button().click().await
    }

    pub async fn private_repo_warning_is_visible(&self) -> Result<bool> {
        self.page.is_visible(sel::PRIVATE_REPO_WARNING).await
    }

    pub async fn workspace_limit_warning_is_visible(&self) -> Result<bool> {
        self.page.is_visible(sel::WORKSPACE_LIMIT_WARNING).await
    }

    /// Blocks until the extension icon shows up in the activity bar, which
    /// only happens once the workspace has booted.
    pub async fn wait_for_openstax_icon(&self) -> Result<Locator<'p, B>> {
        self.page
            .wait_for_selector(sel::OPENSTAX_ICON, self.timeouts.workspace_boot)
            .await
    }

    pub fn openstax_icon(&self) -> Locator<'p, B> {
        self.page.locator(sel::OPENSTAX_ICON)
    }

    pub async fn click_openstax_icon(&self) -> Result<()> {
        self.openstax_icon().click().await
    }

    // ── Frames ──────────────────────────────────────────────────────

    /// The most recently attached top-level iframe (the extension webview).
    pub fn parent_frame(&self) -> FrameLocator<'p, B> {
        self.page.frame_locator(sel::PARENT_FRAME).last()
    }

    /// The document actually rendered by the webview.
    pub fn child_frame(&self) -> FrameLocator<'p, B> {
        self.parent_frame().frame_locator(sel::CHILD_FRAME)
    }

    // ── Welcome view ────────────────────────────────────────────────

    pub async fn open_toc_editor_button_is_visible(&self) -> Result<bool> {
        self.page.is_visible(sel::OPEN_TOC_EDITOR_BUTTON).await
    }

    pub fn open_toc_editor_button_locator(&self) -> Locator<'p, B> {
        self.page.locator(sel::OPEN_TOC_EDITOR_BUTTON)
    }

    pub async fn click_open_toc_editor_button(&self) -> Result<()> {
        self.open_toc_editor_button_locator().click().await
    }

    pub async fn push_content_button_is_visible(&self) -> Result<bool> {
        self.page.is_visible(sel::PUSH_CONTENT_BUTTON).await
    }

    pub async fn generate_readme_button_is_visible(&self) -> Result<bool> {
        self.page.is_visible(sel::GENERATE_README_BUTTON).await
    }

    pub async fn validate_content_button_is_visible(&self) -> Result<bool> {
        self.page.is_visible(sel::VALIDATE_CONTENT_BUTTON).await
    }

    pub fn toc_tree_dropdown_list(&self) -> Locator<'p, B> {
        self.page.locator(sel::TOC_TREE_DROPDOWN_LIST)
    }

    // ── TOC editor, left panel ──────────────────────────────────────

    /// Books dropdown plus the add module / add subcollection buttons.
    pub fn toc_editor_add_buttons(&self) -> Locator<'p, B> {
        self.page.locator(sel::TOC_EDITOR_ADD_BUTTONS)
    }

    pub fn book_list_dropdown_locator(&self) -> Locator<'p, B> {
        self.child_frame().locator(sel::BOOK_LIST_DROPDOWN)
    }

    pub async fn click_book_list_dropdown(&self) -> Result<()> {
        self.book_list_dropdown_locator().click().await
    }

    pub fn add_module_locator(&self) -> Locator<'p, B> {
        self.child_frame().locator(sel::ADD_MODULE_BUTTON)
    }

    pub async fn click_add_module(&self) -> Result<()> {
        self.add_module_locator().click().await
    }

    pub fn add_module_input_box(&self) -> Locator<'p, B> {
        self.page.locator(sel::QUICK_INPUT)
    }

    pub fn add_module_input_box_locator(&self) -> Locator<'p, B> {
        self.page.locator(sel::QUICK_INPUT_TEXT_BOX)
    }

    pub async fn fill_add_module_input_box(&self, value: &str) -> Result<()> {
        self.add_module_input_box_locator().fill(value).await
    }

    pub fn chapter_box_title_locator(&self) -> Locator<'p, B> {
        self.child_frame().locator(sel::CHAPTER_BOX_TITLE)
    }

    pub fn chapter_box_title_input(&self) -> Locator<'p, B> {
        self.child_frame().locator(sel::CHAPTER_BOX_TITLE_INPUT)
    }

    pub async fn click_chapter_box_title(&self) -> Result<()> {
        self.chapter_box_title_locator().click().await
    }

    pub async fn fill_chapter_box_title(&self, value: &str) -> Result<()> {
        self.chapter_box_title_input().fill(value).await
    }

    pub fn add_subcollection_locator(&self) -> Locator<'p, B> {
        self.child_frame().locator(sel::ADD_SUBCOLLECTION_BUTTON)
    }

    pub async fn click_add_subcollection(&self) -> Result<()> {
        self.add_subcollection_locator().click().await
    }

    pub fn add_subcollection_input_box(&self) -> Locator<'p, B> {
        self.page.locator(sel::QUICK_INPUT)
    }

    pub fn add_subcollection_input_box_locator(&self) -> Locator<'p, B> {
        self.page.locator(sel::QUICK_INPUT_TEXT_BOX)
    }

    pub async fn fill_add_subcollection_input_box(&self, value: &str) -> Result<()> {
        self.add_subcollection_input_box_locator().fill(value).await
    }

    /// Chapter and subcollection boxes in the left panel.
    pub fn chapter_subcollection_list(&self) -> Locator<'p, B> {
        self.child_frame().locator(sel::CHAPTER_SUBCOLLECTION_LIST)
    }

    /// The most recently added box in the left panel.
    pub fn subcollection_locator_new_box(&self) -> Locator<'p, B> {
        self.child_frame().locator(sel::NEW_BOX)
    }

    pub fn subcollection_locator_new_box_title(&self) -> Locator<'p, B> {
        self.child_frame().locator(sel::NEW_BOX_TITLE)
    }

    pub fn subcollection_locator_new_box_title_input(&self) -> Locator<'p, B> {
        self.child_frame().locator(sel::NEW_BOX_TITLE_INPUT)
    }

    pub async fn click_new_subcollection_box_title(&self) -> Result<()> {
        self.subcollection_locator_new_box_title().click().await
    }

    pub async fn fill_new_subcollection_box_title(&self, value: &str) -> Result<()> {
        self.subcollection_locator_new_box_title_input().fill(value).await
    }

    pub fn search_field_locator(&self) -> Locator<'p, B> {
        self.child_frame().locator(sel::SEARCH_FIELD)
    }

    pub async fn fill_search_field(&self, value: &str) -> Result<()> {
        self.search_field_locator().fill(value).await
    }

    /// "N items found" line under the search field.
    pub fn search_item_amount_indicator(&self) -> Locator<'p, B> {
        self.child_frame().locator(sel::SEARCH_ITEM_AMOUNT_INDICATOR)
    }

    // ── TOC editor, right panel ─────────────────────────────────────

    pub fn toc_editor_all_modules_dropdown(&self) -> Locator<'p, B> {
        self.page.locator(sel::TOC_EDITOR_ALL_MODULES_DROPDOWN)
    }

    pub fn toc_editor_deleted_modules_list(&self) -> Locator<'p, B> {
        self.page.locator(sel::TOC_EDITOR_DELETED_MODULES_LIST)
    }

    // ── Stopping the workspace ──────────────────────────────────────

    pub fn gitpod_menubar_locator(&self) -> Locator<'p, B> {
        self.page.locator(sel::GITPOD_MENUBAR)
    }

    pub async fn click_gitpod_menubar(&self) -> Result<()> {
        self.gitpod_menubar_locator().click().await
    }

    pub fn stop_workspace_button_locator(&self) -> Locator<'p, B> {
        self.page.locator(sel::STOP_WORKSPACE_BUTTON)
    }

    pub async fn click_stop_workspace_button(&self) -> Result<()> {
        self.stop_workspace_button_locator().click().await
    }

    // ── Explorer and panels ─────────────────────────────────────────

    pub async fn menubar_explorer_button_locator(&self) -> Result<Locator<'p, B>> {
        self.wait_workbench(sel::MENUBAR_EXPLORER_BUTTON).await
    }

    pub async fn click_explorer_button(&self) -> Result<()> {
        self.menubar_explorer_button_locator().await?.click().await
    }

    pub async fn explorer_modules_locator(&self) -> Result<Locator<'p, B>> {
        self.wait_workbench(sel::EXPLORER_MODULES).await
    }

    pub async fn click_explorer_modules(&self) -> Result<()> {
        self.explorer_modules_locator().await?.click().await
    }

    pub async fn explorer_submodule_locator(&self) -> Result<Locator<'p, B>> {
        self.wait_workbench(sel::EXPLORER_SUBMODULE).await
    }

    pub async fn click_explorer_submodule(&self) -> Result<()> {
        self.explorer_submodule_locator().await?.click().await
    }

    pub async fn explorer_index_file_locator(&self) -> Result<Locator<'p, B>> {
        self.wait_workbench(sel::EXPLORER_INDEX_FILE).await
    }

    pub async fn click_explorer_index_file(&self) -> Result<()> {
        self.explorer_index_file_locator().await?.click().await
    }

    pub async fn problems_tab_locator(&self) -> Result<Locator<'p, B>> {
        self.wait_workbench(sel::PROBLEMS_TAB).await
    }

    pub async fn click_problems_tab(&self) -> Result<()> {
        self.problems_tab_locator().await?.click().await
    }

    pub async fn problems_tab_message(&self) -> Result<Locator<'p, B>> {
        self.wait_workbench(sel::PROBLEMS_TAB_MESSAGE).await
    }

    // ── Gitpod user switcher ────────────────────────────────────────

    pub async fn gitpod_user_dropdown(&self) -> Result<Locator<'p, B>> {
        self.page.wait_for_selector_default(sel::GITPOD_USER_DROPDOWN).await
    }

    pub async fn click_gitpod_user_dropdown(&self) -> Result<()> {
        self.gitpod_user_dropdown().await?.click().await
    }

    pub async fn gitpod_user_selector(&self) -> Result<Locator<'p, B>> {
        self.page.wait_for_selector_default(sel::GITPOD_USER_OPENSTAX).await
    }

    pub async fn click_gitpod_user_selector(&self) -> Result<()> {
        self.gitpod_user_selector().await?.click().await
    }

    // ── Flows ───────────────────────────────────────────────────────

    /// Click "add module", then type its title into the quick input.
    pub async fn add_module(&self, title: &str) -> Result<()> {
        debug!(title, "adding module");
        self.click_add_module().await?;
        self.fill_add_module_input_box(title).await
    }

    /// Click "add subcollection", then type its title into the quick input.
    pub async fn add_subcollection(&self, title: &str) -> Result<()> {
        debug!(title, "adding subcollection");
        self.click_add_subcollection().await?;
        self.fill_add_subcollection_input_box(title).await
    }

    pub async fn rename_chapter_box(&self, title: &str) -> Result<()> {
        self.click_chapter_box_title().await?;
        self.fill_chapter_box_title(title).await
    }

    pub async fn rename_new_subcollection(&self, title: &str) -> Result<()> {
        self.click_new_subcollection_box_title().await?;
        self.fill_new_subcollection_box_title(title).await
    }

    pub async fn search(&self, text: &str) -> Result<()> {
        self.fill_search_field(text).await
    }

    pub async fn stop_workspace(&self) -> Result<()> {
        debug!("stopping workspace");
        self.click_gitpod_menubar().await?;
        self.click_stop_workspace_button().await
    }

    pub async fn switch_to_openstax_user(&self) -> Result<()> {
        self.click_gitpod_user_dropdown().await?;
        self.click_gitpod_user_selector().await
    }

    async fn wait_workbench(&self, selector: &str) -> Result<Locator<'p, B>> {
        self.page.wait_for_selector(selector, self.timeouts.workbench).await
    }
}
