//! Fixed copy and mock data shown by the demo screens
//!
//! None of this is derived from real session data; the screens render these
//! records verbatim.

pub const ASSISTANT_NAME: &str = "Rikki";

pub const GREETING: &str = "Hello! I'm Rikki, your eco-friendly assistant. 🌿 I'm here to help you learn about waste management, recycling, and sustainable living. How can I help you today?";

/// Replies used by the scripted chat mode. Must stay non-empty.
pub const CANNED_RESPONSES: [&str; 5] = [
    "Great question! Plastic recycling starts with checking the number on the bottom. Numbers 1, 2, and 5 are most commonly accepted. Always rinse containers before recycling!",
    "Composting is wonderful for the environment! Start with fruit/veggie scraps, coffee grounds, and eggshells. Avoid meat, dairy, and oily foods. Keep your bin moist but not soggy.",
    "To reduce water waste, try shorter showers, fix leaky faucets, and collect rainwater for plants. Every drop counts towards a sustainable future! 💧",
    "That's an excellent sustainable practice! Small changes make a big difference. What else would you like to learn about?",
    "I'm here to help you on your eco-journey! Together, we can make our planet greener. 🌱",
];

pub const ANALYZING_IMAGE: &str = "Analyzing image...";
pub const IMAGE_ANALYSIS_FAILED: &str = "Sorry, I couldn't analyze the image.";
pub const CHAT_REPLY_FAILED: &str =
    "Sorry, I couldn't reach my eco-knowledge base just now. Please try again in a moment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

pub const HERO_BADGE: &str = "AI-Powered Sustainability";
pub const HERO_HEADLINE: [&str; 2] = ["Your Journey to Sustainable Living", "Starts Here"];
pub const HERO_INTRO: &str = "Meet Rikki, your intelligent eco-companion. Get instant answers about recycling, composting, waste management, and sustainable practices. Together, we'll make the world a greener place, one conversation at a time.";
pub const CALL_TO_ACTION_TITLE: &str = "Ready to Make a Difference?";
pub const CALL_TO_ACTION_BODY: &str = "Join thousands of users who are making sustainable choices every day. Start your eco-friendly journey with Rikki now!";

pub const FEATURES: [Feature; 4] = [
    Feature {
        title: "Personalized Guidance",
        description: "Get tailored advice on recycling, composting, and sustainable practices",
    },
    Feature {
        title: "Waste Management",
        description: "Learn proper recycling techniques and waste sorting methods",
    },
    Feature {
        title: "Track Your Impact",
        description: "Monitor your eco-friendly actions and see your environmental impact",
    },
    Feature {
        title: "Educational Resources",
        description: "Access a wealth of knowledge about sustainable living",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStat {
    pub label: &'static str,
    pub value: &'static str,
    pub change: &'static str,
}

pub const DASHBOARD_STATS: [DashboardStat; 4] = [
    DashboardStat {
        label: "Total Conversations",
        value: "76",
        change: "+12 this week",
    },
    DashboardStat {
        label: "Topics Explored",
        value: "24",
        change: "Recycling, Composting, Water",
    },
    DashboardStat {
        label: "Learning Streak",
        value: "15 days",
        change: "Keep it going!",
    },
    DashboardStat {
        label: "Time Spent Learning",
        value: "4.2 hrs",
        change: "This month",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLogSummary {
    pub id: &'static str,
    pub title: &'static str,
    pub date: &'static str,
    pub time: &'static str,
    pub message_count: u32,
    pub topics: &'static [&'static str],
    pub duration: &'static str,
}

pub const CHAT_LOGS: [ChatLogSummary; 5] = [
    ChatLogSummary {
        id: "1",
        title: "Plastic Recycling Guide",
        date: "Nov 6, 2025",
        time: "10:30 AM",
        message_count: 12,
        topics: &["Recycling", "Plastic"],
        duration: "8 min",
    },
    ChatLogSummary {
        id: "2",
        title: "Composting Basics",
        date: "Nov 5, 2025",
        time: "2:15 PM",
        message_count: 18,
        topics: &["Composting", "Waste Management"],
        duration: "12 min",
    },
    ChatLogSummary {
        id: "3",
        title: "Water Conservation Tips",
        date: "Nov 4, 2025",
        time: "9:45 AM",
        message_count: 15,
        topics: &["Water", "Conservation"],
        duration: "10 min",
    },
    ChatLogSummary {
        id: "4",
        title: "Sustainable Living Ideas",
        date: "Nov 3, 2025",
        time: "4:20 PM",
        message_count: 22,
        topics: &["Sustainability", "Lifestyle"],
        duration: "15 min",
    },
    ChatLogSummary {
        id: "5",
        title: "E-waste Disposal",
        date: "Nov 2, 2025",
        time: "11:00 AM",
        message_count: 9,
        topics: &["E-waste", "Recycling"],
        duration: "6 min",
    },
];
