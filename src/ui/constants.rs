// Tile labels and key bindings - single source of truth for the dashboard,
// the footer and the help overlay

pub const TIMER_TITLE: &str = "Timer / 番茄鐘";
pub const NEWS_TITLE: &str = "Live News / 精選動態";
pub const MEMO_TITLE: &str = "Memo / 隨手筆記";
pub const QUOTE_TITLE: &str = "Mindful Reflection / 點擊感悟";
pub const CLOCK_TITLE: &str = "Now / 此刻";
pub const HELP_TITLE: &str = "Keys / 快捷鍵";

// Memo tile
pub const MEMO_EMPTY: &str = "No notes yet. / 尚無內容。";
pub const MEMO_PLACEHOLDER: &str = "New note... / 新筆記...";

// News tile
pub const NEWS_IDLE: &str = "Press / to search, r to refresh";
pub const NEWS_LOADING: &str = "SEARCHING THE WEB / 搜尋中";
pub const NEWS_EMPTY: &str = "Nothing found, try another keyword. / 找不到相關動態，請嘗試其他關鍵字。";
pub const NEWS_ERROR: &str = "Could not load news / 無法載入新聞";
pub const NEWS_AUTH: &str = "News search needs an API key / 需要 API 金鑰";
pub const NEWS_AUTH_HINT: &str = "Set GEMINI_API_KEY or [provider] api_key, then press r";

// Weather tile
pub const WEATHER_LOCATING: &str = "Locating... / 定位中...";
pub const WEATHER_LOADING: &str = "Loading... / 讀取數據...";
pub const WEATHER_UNAVAILABLE: &str = "Weather unavailable / 無法取得天氣";

// Timer tile
pub const TIMER_RUNNING: &str = "▶ running";
pub const TIMER_PAUSED: &str = "⏸ paused";

/// (scope, keys, action) rows shown in the help overlay
pub const KEY_BINDINGS: &[(&str, &str, &str)] = &[
    ("Global", "Tab / Shift-Tab", "Move focus between tiles"),
    ("Global", "w", "Refresh weather"),
    ("Global", "?", "Toggle this help"),
    ("Global", "q / Ctrl-C", "Quit"),
    ("Timer", "Space", "Start / pause"),
    ("Timer", "r", "Reset current mode"),
    ("Timer", "f / b", "Switch to focus / break"),
    ("News", "/", "Edit search keyword"),
    ("News", "Enter", "Search"),
    ("News", "r", "Refresh"),
    ("News", "s", "Shuffle stories"),
    ("Memo", "a / i", "Write a new memo"),
    ("Memo", "Enter", "Save memo"),
    ("Memo", "↑ / ↓", "Select memo"),
    ("Memo", "d / Delete", "Remove selected memo"),
    ("Quote", "Enter / Space", "Next quote"),
    ("Editing", "Esc", "Cancel input"),
];
