use crate::engine::achievements::Achievement;
use crate::engine::items::{Cadence, Difficulty, DueBucket, Habit, Mission, MissionStatus, Priority};
use crate::engine::shop::Reward;

pub fn habits() -> Vec<Habit> {
    vec![
        Habit::new(1, "Brush my teeth", Cadence::Daily, Difficulty::Easy),
        Habit::new(2, "Clean my room", Cadence::Weekly, Difficulty::Medium),
        Habit::new(3, "Tidy up", Cadence::Daily, Difficulty::Easy),
    ]
}

pub fn missions() -> Vec<Mission> {
    let mut posted = Mission::new(2, "Post content", Priority::Medium, DueBucket::Today, 20);
    posted.status = MissionStatus::Completed;
    vec![
        Mission::new(1, "Code for an hour", Priority::Medium, DueBucket::Today, 20),
        posted,
        Mission::new(3, "Read a book", Priority::High, DueBucket::Label("30 Oct".into()), 30),
        Mission::new(4, "Learn about AI", Priority::High, DueBucket::Label("30 Oct".into()), 30),
    ]
}

// Level requirements are stored as the XP that reaches the level (level n = (n - 1) * 100).
pub fn achievements() -> Vec<Achievement> {
    vec![
        Achievement::new(1, "Programming royalty", 400, 50),
        Achievement::new(2, "Social media influencer", 200, 50),
        Achievement::new(3, "Avid reader", 900, 50),
        Achievement::new(4, "AI expert", 500, 100),
        Achievement::new(5, "Clean home", 200, 30),
    ]
}

pub fn rewards() -> Vec<Reward> {
    vec![
        Reward::new(1, "Half an hour of games", Some("🦈".into()), Some(150)),
        Reward::new(2, "Watch a movie", Some("🍿".into()), Some(200)),
        Reward::new(3, "Fried chicken", Some("🍗".into()), Some(250)),
        Reward::new(4, "Something sweet", Some("🍬".into()), Some(100)),
    ]
}
