//! The rewrite rule table.
//!
//! One row per recognized moment.js member name, keyed separately for static
//! members (`moment.utc`) and instance members (`m.seconds`). The table is
//! pure data built once at startup: adding a new API mapping means adding a
//! row here, never touching the matcher.
//!
//! Day.js is modular where moment.js is monolithic, so a row also names the
//! plugins the rewritten call depends on. Plugin requirements are recorded
//! only when the row actually matches a call site.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Module specifier of the library being migrated away from.
pub const SOURCE_LIB: &str = "moment";
/// Module specifier of the library being migrated to.
pub const TARGET_LIB: &str = "dayjs";
/// The source library's principal exported type name.
pub const SOURCE_TYPE: &str = "Moment";
/// The target library's principal exported type name.
pub const TARGET_TYPE: &str = "Dayjs";

/// Call reshaping that goes beyond a member rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralTransform {
    /// Getter/setter overload split: a zero-argument call renames to the
    /// singular unit getter, a one-argument call becomes
    /// `recv.set('<unit>', value)`.
    GetSet { unit: &'static str },
    /// `moment.isDate(x)` has no Day.js counterpart; the closest equivalent
    /// is `dayjs(x).isValid()`.
    WrapIsValid,
}

/// Declarative rewrite behavior for one member name.
#[derive(Debug, Clone, Copy)]
pub struct RewriteRule {
    /// New member name, when the target API renames the member.
    pub rename: Option<&'static str>,
    /// Day.js plugins that must be activated for the rewritten call to work.
    pub plugins: &'static [&'static str],
    /// Call reshaping that goes beyond a rename.
    pub transform: Option<StructuralTransform>,
}

/// A member that exists unchanged in the target API.
const PASS: RewriteRule = RewriteRule {
    rename: None,
    plugins: &[],
    transform: None,
};

const fn renamed(to: &'static str) -> RewriteRule {
    RewriteRule {
        rename: Some(to),
        plugins: &[],
        transform: None,
    }
}

const fn with_plugins(plugins: &'static [&'static str]) -> RewriteRule {
    RewriteRule {
        rename: None,
        plugins,
        transform: None,
    }
}

const fn reshaped(transform: StructuralTransform) -> RewriteRule {
    RewriteRule {
        rename: None,
        plugins: &[],
        transform: Some(transform),
    }
}

const fn get_set(unit: &'static str) -> RewriteRule {
    reshaped(StructuralTransform::GetSet { unit })
}

const fn get_set_with(unit: &'static str, plugins: &'static [&'static str]) -> RewriteRule {
    RewriteRule {
        rename: None,
        plugins,
        transform: Some(StructuralTransform::GetSet { unit }),
    }
}

/// Static members: `moment.<member>(...)`.
const STATIC_RULES: &[(&str, RewriteRule)] = &[
    ("utc", with_plugins(&["utc"])),
    ("unix", PASS),
    ("locale", PASS),
    ("duration", with_plugins(&["duration"])),
    ("isMoment", renamed("isDayjs")),
    ("isDate", reshaped(StructuralTransform::WrapIsValid)),
    ("max", with_plugins(&["minMax"])),
    ("min", with_plugins(&["minMax"])),
    ("months", with_plugins(&["localeData"])),
    ("monthsShort", with_plugins(&["localeData"])),
    ("weekdays", with_plugins(&["localeData"])),
    ("weekdaysShort", with_plugins(&["localeData"])),
    ("weekdaysMin", with_plugins(&["localeData"])),
    ("updateLocale", with_plugins(&["updateLocale"])),
    ("tz", with_plugins(&["utc", "timezone"])),
];

/// Instance members: `m.<member>(...)`, matched by name because chained
/// receivers are not statically known to be the alias.
const INSTANCE_RULES: &[(&str, RewriteRule)] = &[
    // Getter/setter overloads. Plural unit names collapse to the singular
    // getter; the one-argument forms become `set` calls.
    ("milliseconds", get_set("millisecond")),
    ("seconds", get_set("second")),
    ("minutes", get_set("minute")),
    ("hours", get_set("hour")),
    ("dates", get_set("date")),
    ("date", get_set("date")),
    ("days", get_set("day")),
    ("day", get_set("day")),
    ("weeks", get_set_with("week", &["weekOfYear"])),
    ("week", get_set_with("week", &["weekOfYear"])),
    ("months", get_set("month")),
    ("years", get_set("year")),
    ("quarters", get_set_with("quarter", &["quarterOfYear"])),
    ("quarter", get_set_with("quarter", &["quarterOfYear"])),
    // Members that exist in the target API behind a plugin.
    ("utc", with_plugins(&["utc"])),
    ("local", with_plugins(&["utc"])),
    ("utcOffset", with_plugins(&["utc"])),
    ("tz", with_plugins(&["utc", "timezone"])),
    ("fromNow", with_plugins(&["relativeTime"])),
    ("from", with_plugins(&["relativeTime"])),
    ("toNow", with_plugins(&["relativeTime"])),
    ("to", with_plugins(&["relativeTime"])),
    ("calendar", with_plugins(&["calendar"])),
    ("isBetween", with_plugins(&["isBetween"])),
    ("isSameOrAfter", with_plugins(&["isSameOrAfter"])),
    ("isSameOrBefore", with_plugins(&["isSameOrBefore"])),
    ("isLeapYear", with_plugins(&["isLeapYear"])),
    ("dayOfYear", with_plugins(&["dayOfYear"])),
    ("weekday", with_plugins(&["weekday"])),
    ("isoWeek", with_plugins(&["isoWeek"])),
    ("isoWeekday", with_plugins(&["isoWeek"])),
    ("isoWeeksInYear", with_plugins(&["isoWeek", "isLeapYear"])),
    ("toArray", with_plugins(&["toArray"])),
    ("toObject", with_plugins(&["toObject"])),
    ("localeData", with_plugins(&["localeData"])),
    // API-compatible members, recognized so they are not flagged.
    ("format", PASS),
    ("add", PASS),
    ("subtract", PASS),
    ("diff", PASS),
    ("valueOf", PASS),
    ("unix", PASS),
    ("toDate", PASS),
    ("toJSON", PASS),
    ("toISOString", PASS),
    ("toString", PASS),
    ("isBefore", PASS),
    ("isAfter", PASS),
    ("isSame", PASS),
    ("clone", PASS),
    ("isValid", PASS),
    ("startOf", PASS),
    ("endOf", PASS),
    ("get", PASS),
    ("set", PASS),
    ("daysInMonth", PASS),
    ("year", PASS),
    ("month", PASS),
    ("hour", PASS),
    ("minute", PASS),
    ("second", PASS),
    ("millisecond", PASS),
    ("locale", PASS),
];

/// Immutable member-name → rule mapping, split by call shape.
pub struct RuleTable {
    statics: HashMap<&'static str, RewriteRule>,
    instance: HashMap<&'static str, RewriteRule>,
}

impl RuleTable {
    /// Look up a static member (`moment.<name>`).
    pub fn static_member(&self, name: &str) -> Option<&RewriteRule> {
        self.statics.get(name)
    }

    /// Look up an instance member (`m.<name>(...)`).
    pub fn instance_member(&self, name: &str) -> Option<&RewriteRule> {
        self.instance.get(name)
    }
}

static TABLE: LazyLock<RuleTable> = LazyLock::new(|| RuleTable {
    statics: STATIC_RULES.iter().copied().collect(),
    instance: INSTANCE_RULES.iter().copied().collect(),
});

/// The shared rule table, built on first use and never mutated.
pub fn rule_table() -> &'static RuleTable {
    &TABLE
}
