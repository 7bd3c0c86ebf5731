//! Selectors for the workspace home screen, kept apart from the accessors
//! so the positional ones can be updated when the workbench DOM shifts.

// Login / workspace start
pub const GITHUB_LOGIN_BUTTON: &str = ".btn-login";
pub const WORKSPACE_CONTINUE_BUTTON: &str = "div.w-full.flex.justify-end.mt-3.space-x-2.px-6 > button";
pub const PRIVATE_REPO_WARNING: &str = "span.flex-1.text-left > div:nth-child(1)";
pub const WORKSPACE_LIMIT_WARNING: &str = "div:nth-child(6) > div > div > div:nth-child(2)";

// Activity bar
pub const OPENSTAX_ICON: &str = "div.composite-bar > div > ul > li:nth-child(7)";
pub const MENUBAR_EXPLORER_BUTTON: &str = "div.composite-bar > div > ul > li:nth-child(1)";

// Webview frames
pub const PARENT_FRAME: &str = "iframe";
pub const CHILD_FRAME: &str = "#active-frame";

// Welcome view
pub const OPEN_TOC_EDITOR_BUTTON: &str = "div.welcome-view-content > div:nth-child(1)";
pub const PUSH_CONTENT_BUTTON: &str = "div.welcome-view-content > div:nth-child(2)";
pub const GENERATE_README_BUTTON: &str = "div.welcome-view-content > div:nth-child(3)";
pub const VALIDATE_CONTENT_BUTTON: &str = "div.welcome-view-content > div:nth-child(4)";
pub const TOC_TREE_DROPDOWN_LIST: &str =
    "div.split-view-container > div:nth-child(2) > div > div.pane-header.expanded > h3";

// TOC editor, left panel (inside the webview)
pub const TOC_EDITOR_ADD_BUTTONS: &str = "div.panel-editable > div.controls > div:nth-child(2)";
pub const BOOK_LIST_DROPDOWN: &str = "div.panel-editable > div.controls > select";
pub const ADD_MODULE_BUTTON: &str = "button.page-create";
pub const ADD_SUBCOLLECTION_BUTTON: &str = "button.subbook-create";
pub const CHAPTER_SUBCOLLECTION_LIST: &str =
    "div.panel-editable > div:nth-child(2) > div > div > div > div:nth-child(1)";
pub const NEW_BOX: &str = "div.panel-editable > div:nth-child(2) > div > div > div > div:nth-child(1) > \
    div > div > div:nth-child(1)";
pub const NEW_BOX_TITLE: &str = "div.panel-editable > div:nth-child(2) > div > div > div > div:nth-child(1) > \
    div > div > div:nth-child(1) > div.rst__nodeContent > div > div > div > div.rst__rowContents > \
    div.rst__rowLabel";
pub const NEW_BOX_TITLE_INPUT: &str = "div.panel-editable > div:nth-child(2) > div > div > div > div:nth-child(1) > \
    div > div > div:nth-child(1) > div.rst__nodeContent > div > div > div > div.rst__rowContents > \
    div.rst__rowLabel > span > input";
pub const CHAPTER_BOX_TITLE: &str = "div.panel-editable > div:nth-child(2) > div > div > div > div:nth-child(1) > \
    div > div > div:nth-child(1) > div.rst__nodeContent > div > div > div > div.rst__rowContents > \
    div.rst__rowLabel > span.rst__rowTitle.rst__rowTitleWithSubtitle";
pub const CHAPTER_BOX_TITLE_INPUT: &str = "div.panel-editable > div:nth-child(2) > div > div > div > div:nth-child(1) > \
    div > div > div:nth-child(1) > div.rst__nodeContent > div > div > div > div.rst__rowContents > \
    div.rst__rowLabel > span.rst__rowTitle.rst__rowTitleWithSubtitle > input";
pub const SEARCH_FIELD: &str = "div.panel-editable > div.controls > div:nth-child(3) > input";
pub const SEARCH_ITEM_AMOUNT_INDICATOR: &str = "div.panel-editable > div.controls > div:nth-child(3) > p";

// Workbench quick input (module / subcollection name prompt)
pub const QUICK_INPUT: &str = "div.quick-input-widget.show-file-icons";
pub const QUICK_INPUT_TEXT_BOX: &str = "div.quick-input-widget.show-file-icons input[type=\"text\"]";

// TOC editor, right panel
pub const TOC_EDITOR_ALL_MODULES_DROPDOWN: &str = "div[class='controls']";
pub const TOC_EDITOR_DELETED_MODULES_LIST: &str = "div:nth-child(2) > div > div > div > div:nth-child(1)";

// Stopping the workspace
pub const GITPOD_MENUBAR: &str = "div[class=\"menubar-menu-button\"]";
pub const STOP_WORKSPACE_BUTTON: &str = "div.monaco-menu > div > ul > li:nth-child(15) > a > span.action-label";

// Explorer and panels
pub const EXPLORER_MODULES: &str = "div[class='monaco-list-row'] :text('modules')";
pub const EXPLORER_SUBMODULE: &str = "id=list_id_1_9";
pub const EXPLORER_INDEX_FILE: &str = "id=list_id_1_10";
pub const PROBLEMS_TAB: &str = "div.composite-bar.panel-switcher-container > div > ul > li:nth-child(2)";
pub const PROBLEMS_TAB_MESSAGE: &str = "div.pane-body.markers-panel.wide";

// Gitpod user switcher
pub const GITPOD_USER_DROPDOWN: &str = "div:nth-child(1) > div.relative";
pub const GITPOD_USER_OPENSTAX: &str = "div:nth-child(1) > div.relative :text('openstax')";
