pub struct Icons;

impl Icons {
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const MONEY: &str = "💰";
    pub const BILL: &str = "🧾";
    pub const CALENDAR: &str = "📅";
    pub const DEL: &str = "🗑️";
    pub const MOD: &str = "📝";
    pub const WAVE: &str = "👋";
}
