#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigInitialized(String), // path
    ConfigSaved(String),       // path
    ConfigModuleJira,
    ConfigModuleLog,

    // === LOG MESSAGES ===
    RecordLogged {
        ticket: String,
        time_spent: String,
        started: String,
    },
    TimeSpentTrimmed {
        logged: String,
        cap: String,
    },
    DayRedistributed {
        adjusted: usize,
        per_record: String,
    },
    AliasResolved {
        alias: String,
        ticket: String,
    },

    // === PUSH MESSAGES ===
    PreviewHeader(String), // host
    PreviewRequest {
        url: String,
        body: String,
    },
    PreviewTotal(usize),
    PreviewDone,
    PreviewNoHost,
    NothingToPush,
    PushSummary {
        pushed: usize,
        total: usize,
    },
    PushFailed(String), // reason

    // === REPORT MESSAGES ===
    DailyReportHeader(String),   // date
    MonthlyReportHeader(String), // data file name
    NoRecords(String),           // data file name

    // === PROMPTS ===
    PromptJiraHost,
    PromptJiraUsername,
    PromptJiraPassword,
    PromptDailyCap,
    PromptAliases,
}
