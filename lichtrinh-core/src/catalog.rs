//! Static lookup tables: category presentation, time-of-day labels, wizard
//! options and loading messages.
//!
//! Everything here is immutable and shared by all renderers.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Palette family used to style a category.
pub enum Tone {
    /// Sightseeing.
    Blue,
    /// Food.
    Orange,
    /// Breakfast and cafes.
    Amber,
    /// Dinner.
    Red,
    /// Accommodation.
    Purple,
    /// Shopping.
    Pink,
    /// Anything unknown.
    Gray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How a category is shown on every surface.
pub struct CategoryPresentation {
    /// Vietnamese label.
    pub label: &'static str,
    /// Leading emoji.
    pub emoji: &'static str,
    /// Hex color used for markers and infographic accents.
    pub color: &'static str,
    /// Palette family for terminal styling.
    pub tone: Tone,
}

const fn presentation(
    label: &'static str,
    emoji: &'static str,
    color: &'static str,
    tone: Tone,
) -> CategoryPresentation {
    CategoryPresentation {
        label,
        emoji,
        color,
        tone,
    }
}

/// Presentation used when none of an item's tags is known.
pub const FALLBACK_CATEGORY: CategoryPresentation =
    presentation("Điểm đến", "📍", "#9ca3af", Tone::Gray);

/// Known category tags in priority order.
pub static CATEGORY_TABLE: &[(&str, CategoryPresentation)] = &[
    ("attraction", presentation("Tham quan", "🏛", "#3b82f6", Tone::Blue)),
    ("food", presentation("Ăn uống", "🍜", "#f97316", Tone::Orange)),
    ("restaurant", presentation("Ăn uống", "🍜", "#f97316", Tone::Orange)),
    ("breakfast", presentation("Bữa sáng", "🥐", "#f59e0b", Tone::Amber)),
    ("lunch", presentation("Bữa trưa", "🍜", "#f97316", Tone::Orange)),
    ("dinner", presentation("Bữa tối", "🍽", "#ef4444", Tone::Red)),
    ("accommodation", presentation("Nghỉ ngơi", "🏨", "#a855f7", Tone::Purple)),
    ("cafe", presentation("Cafe", "☕", "#f59e0b", Tone::Amber)),
    ("shopping", presentation("Mua sắm", "🛒", "#ec4899", Tone::Pink)),
];

/// Route colors per day, cycled by day index.
pub const DAY_COLORS: [&str; 5] = ["#3b82f6", "#f97316", "#10b981", "#a855f7", "#ec4899"];

/// Accent color of the infographic and badges.
pub const ACCENT: &str = "#059669";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Part of the day a visit falls into.
pub enum TimeOfDay {
    /// Before noon.
    Morning,
    /// Noon until 17:00.
    Afternoon,
    /// 17:00 onwards, and anything that cannot be parsed.
    Evening,
}

impl TimeOfDay {
    /// Buckets in display order.
    pub const ALL: [TimeOfDay; 3] = [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening];

    /// Bucket for an hour of the day; hours past 23 count as evening.
    #[must_use]
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..12 => TimeOfDay::Morning,
            12..17 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }

    /// Vietnamese heading.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Buổi sáng",
            TimeOfDay::Afternoon => "Buổi chiều",
            TimeOfDay::Evening => "Buổi tối",
        }
    }

    /// Heading emoji.
    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "🌅",
            TimeOfDay::Afternoon => "☀️",
            TimeOfDay::Evening => "🌙",
        }
    }

    /// Heading color.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "#f59e0b",
            TimeOfDay::Afternoon => "#ea580c",
            TimeOfDay::Evening => "#7c3aed",
        }
    }
}

#[derive(Debug, Clone, Copy)]
/// Trip length choice.
pub struct DurationOption {
    /// Request code, e.g. `3d2n`.
    pub code: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Number of days sent to the service.
    pub num_days: u32,
    /// Marked as the most popular choice.
    pub popular: bool,
}

#[derive(Debug, Clone, Copy)]
/// Travel companion choice.
pub struct CompanionOption {
    /// Request code.
    pub code: &'static str,
    /// Icon.
    pub emoji: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Second line.
    pub subtitle: &'static str,
    /// Micro-copy shown after selecting.
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy)]
/// Trip vibe choice.
pub struct VibeOption {
    /// Request code.
    pub code: &'static str,
    /// Icon.
    pub emoji: &'static str,
    /// Display label.
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy)]
/// Budget choice.
pub struct BudgetOption {
    /// Request code.
    pub code: &'static str,
    /// Icon.
    pub emoji: &'static str,
    /// Display title.
    pub title: &'static str,
    /// Per-person range.
    pub range: &'static str,
    /// Short description.
    pub description: &'static str,
    /// Micro-copy shown after selecting.
    pub message: &'static str,
    /// Budget amount in VND sent to the service.
    pub amount: i64,
}

/// Micro-copy shown once a duration is picked.
pub const DURATION_MESSAGE: &str = "Nice! Mình sắp xếp lịch trình vừa đủ cho bạn 👌";

/// Maximum number of vibes per trip.
pub const MAX_VIBES: usize = 3;

/// Trip length choices.
pub static DURATION_OPTIONS: &[DurationOption] = &[
    DurationOption {
        code: "2d1n",
        label: "2 ngày 1 đêm",
        num_days: 2,
        popular: false,
    },
    DurationOption {
        code: "3d2n",
        label: "3 ngày 2 đêm",
        num_days: 3,
        popular: true,
    },
    DurationOption {
        code: "4d3n",
        label: "4 ngày 3 đêm",
        num_days: 4,
        popular: false,
    },
    DurationOption {
        code: "5d4n",
        label: "5 ngày 4 đêm",
        num_days: 5,
        popular: false,
    },
];

/// Companion choices.
pub static COMPANION_OPTIONS: &[CompanionOption] = &[
    CompanionOption {
        code: "solo",
        emoji: "🧑",
        label: "Solo",
        subtitle: "Một mình khám phá",
        message: "Tự do là chính! Mình gợi ý lịch trình thoải mái cho bạn 🎒",
    },
    CompanionOption {
        code: "couple",
        emoji: "💑",
        label: "Couple",
        subtitle: "Đi cùng người yêu",
        message: "Mình biết mấy chỗ view đẹp lắm cho hai bạn 💕",
    },
    CompanionOption {
        code: "friends",
        emoji: "👫",
        label: "Friends",
        subtitle: "Đi với hội bạn",
        message: "Đi đông vui ghê! Mình ưu tiên chỗ vui và quán ăn group nha 🎉",
    },
    CompanionOption {
        code: "family",
        emoji: "👨‍👩‍👧",
        label: "Family",
        subtitle: "Đi cùng gia đình",
        message: "Mình sẽ chọn đường an toàn, đi thoải mái cho cả nhà 🏡",
    },
];

/// Vibe choices.
pub static VIBE_OPTIONS: &[VibeOption] = &[
    VibeOption {
        code: "healing",
        emoji: "🧘",
        label: "Healing",
    },
    VibeOption {
        code: "adventure",
        emoji: "🏔️",
        label: "Adventure",
    },
    VibeOption {
        code: "aesthetic",
        emoji: "📸",
        label: "Aesthetic",
    },
    VibeOption {
        code: "foodie",
        emoji: "🍜",
        label: "Foodie",
    },
    VibeOption {
        code: "culture",
        emoji: "🏛️",
        label: "Culture",
    },
    VibeOption {
        code: "fun",
        emoji: "🎉",
        label: "Fun",
    },
];

/// Budget choices.
pub static BUDGET_OPTIONS: &[BudgetOption] = &[
    BudgetOption {
        code: "budget",
        emoji: "🎒",
        title: "Tiết kiệm",
        range: "Dưới 1.5tr/người",
        description: "Homestay, ăn local",
        message: "Hà Giang rẻ mà đẹp lắm, mình biết nhiều chỗ ngon bổ rẻ! 😋",
        amount: 3_000_000,
    },
    BudgetOption {
        code: "comfortable",
        emoji: "💼",
        title: "Thoải mái",
        range: "1.5-3tr/người",
        description: "Khách sạn, đa dạng ăn uống",
        message: "Ổn rồi! Đủ để trải nghiệm thoải mái 👌",
        amount: 6_000_000,
    },
    BudgetOption {
        code: "luxury",
        emoji: "✨",
        title: "Thoải mái chi",
        range: "3tr+/người",
        description: "Resort, trải nghiệm xịn",
        message: "Xịn đó! Mình sẽ gợi ý mấy chỗ chất lượng nhất ✨",
        amount: 10_000_000,
    },
];

/// Messages cycled on the loading screen.
pub static LOADING_MESSAGES: &[&str] = &[
    "Đang tìm quán phở ngon nhất Đồng Văn... 🍜",
    "Check đường đèo Mã Pí Lèng... 🛣️",
    "Hỏi thăm mấy anh local chỗ view đẹp... 📸",
    "Sắp xếp lịch trình hợp lý nhất... 🗓️",
    "Tìm homestay view thung lũng... 🏡",
    "Gần xong rồi nè... ✨",
];

/// Find a duration option by code.
#[must_use]
pub fn duration_option(code: &str) -> Option<&'static DurationOption> {
    DURATION_OPTIONS.iter().find(|option| option.code == code)
}

/// Find a companion option by code.
#[must_use]
pub fn companion_option(code: &str) -> Option<&'static CompanionOption> {
    COMPANION_OPTIONS.iter().find(|option| option.code == code)
}

/// Find a vibe option by code.
#[must_use]
pub fn vibe_option(code: &str) -> Option<&'static VibeOption> {
    VIBE_OPTIONS.iter().find(|option| option.code == code)
}

/// Find a budget option by code.
#[must_use]
pub fn budget_option(code: &str) -> Option<&'static BudgetOption> {
    BUDGET_OPTIONS.iter().find(|option| option.code == code)
}
