//! Built-in sample data shown in placeholder mode.

use crate::screens::diet::{DailyMeals, DailyPlan, DietPlan, MealItem};
use crate::screens::home::{ActivitySummary, HomeSummary, SleepSummary, WeightProgress};
use crate::screens::playlists::{Playlist, Track};
use crate::screens::workouts::{WorkoutPlan, WorkoutSession, WorkoutsOverview};

const SAMPLE_PLAYLIST_URL: &str = "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M";

fn meal(
    name: &str,
    description: &str,
    [calories, protein, carbs, fats]: [u32; 4],
    image: Option<&str>,
) -> MealItem {
    MealItem {
        name: name.to_string(),
        description: description.to_string(),
        calories,
        protein,
        carbs,
        fats,
        image_url: image.map(|id| {
            format!(
                "https://images.unsplash.com/{}?w=600&auto=format&fit=crop",
                id
            )
        }),
    }
}

pub fn diet_plan() -> DietPlan {
    DietPlan::from(vec![
        DailyPlan {
            day: "Monday".to_string(),
            meals: DailyMeals {
                breakfast: meal(
                    "Oatmeal with Berries & Nuts",
                    "Hearty oats cooked with water/milk, topped with mixed berries, sliced almonds, and a drizzle of honey.",
                    [350, 10, 55, 12],
                    Some("photo-1517431525-a13a00f27464"),
                ),
                lunch: meal(
                    "Grilled Chicken Salad",
                    "Mixed greens, grilled chicken breast, cherry tomatoes, cucumber, bell peppers, light vinaigrette.",
                    [450, 40, 20, 20],
                    Some("photo-1512850183-6d7990f42383"),
                ),
                dinner: meal(
                    "Baked Salmon with Asparagus & Quinoa",
                    "Oven-baked salmon fillet, steamed asparagus, and a side of fluffy quinoa.",
                    [550, 45, 40, 25],
                    Some("photo-1546069901-ba9599a7e63c"),
                ),
                snacks: vec![
                    meal(
                        "Greek Yogurt with Blueberries",
                        "Plain Greek yogurt with fresh blueberries.",
                        [150, 15, 15, 2],
                        None,
                    ),
                    meal(
                        "Handful of Almonds",
                        "Approximately 1/4 cup of raw almonds.",
                        [180, 6, 6, 15],
                        None,
                    ),
                ],
            },
        },
        DailyPlan {
            day: "Tuesday".to_string(),
            meals: DailyMeals {
                breakfast: meal(
                    "Scrambled Eggs with Spinach & Whole Wheat Toast",
                    "Two scrambled eggs with sautéed spinach and one slice of whole wheat toast.",
                    [300, 20, 25, 12],
                    Some("photo-1525990263304-434863c0a525"),
                ),
                lunch: meal(
                    "Lentil Soup with Whole Grain Bread",
                    "Hearty lentil soup, rich in fiber and protein, served with a slice of whole grain bread.",
                    [400, 20, 60, 10],
                    Some("photo-1608447040498-854746f33d76"),
                ),
                dinner: meal(
                    "Turkey Stir-fry with Brown Rice",
                    "Lean ground turkey stir-fried with mixed vegetables (broccoli, carrots, snow peas) and soy sauce, served with brown rice.",
                    [500, 40, 50, 15],
                    Some("photo-1546931557-ad6d193d5f57"),
                ),
                snacks: vec![meal(
                    "Apple Slices with Peanut Butter",
                    "One medium apple sliced with 2 tablespoons of natural peanut butter.",
                    [250, 8, 25, 15],
                    None,
                )],
            },
        },
    ])
}

fn playlist(name: &str, description: &str, image: &str, owner: &str, tracks: u32) -> Playlist {
    Playlist {
        name: name.to_string(),
        description: description.to_string(),
        spotify_url: SAMPLE_PLAYLIST_URL.to_string(),
        image_url: Some(format!("https://i.scdn.co/image/{}", image)),
        owner: owner.to_string(),
        tracks_count: tracks,
    }
}

pub fn playlists() -> Vec<Playlist> {
    vec![
        playlist(
            "Morning Energy Boost",
            "Start your day with these upbeat tunes. Perfect for a morning run or intense cardio.",
            "ab67706c0000da847f9c31402271cecb1662c16c",
            "Fitness App",
            45,
        ),
        playlist(
            "Evening Chillout Flow",
            "Relax and unwind with ambient and lo-fi beats. Great for stretching or meditation.",
            "ab67706c0000da845c0879659e516382ac24227f",
            "Zen Master",
            30,
        ),
        playlist(
            "Workout Power Hour",
            "High-energy tracks to push you through your toughest workouts. EDM, Rock, and Hip-Hop.",
            "ab67706c0000da84a95697666270b201f1f2e128",
            "Gym Beast",
            60,
        ),
        playlist(
            "Yoga & Mindfulness",
            "Soft melodies and instrumental pieces for your yoga session or mindful moments.",
            "ab67706c0000da84c47ec945763b364491742460",
            "Inner Peace",
            25,
        ),
    ]
}

/// Mini player queue
pub fn tracks() -> Vec<Track> {
    [
        (
            "Blinding Lights",
            "The Weeknd",
            "ab67616d0000b2734a625807462c01140996849a",
        ),
        (
            "Levitating",
            "Dua Lipa",
            "ab67616d0000b273d47c431b9d750c841362e5b7",
        ),
        (
            "Old Town Road",
            "Lil Nas X ft. Billy Ray Cyrus",
            "ab67616d0000b273d61b35b674846059d43509b5",
        ),
    ]
    .into_iter()
    .map(|(title, artist, art)| Track {
        title: title.to_string(),
        artist: artist.to_string(),
        album_art: Some(format!("https://i.scdn.co/image/{}", art)),
    })
    .collect()
}

pub fn home_summary() -> HomeSummary {
    HomeSummary {
        sleep: SleepSummary {
            score: 54,
            headline: "You Are Getting Enough Rest".to_string(),
            advice: "Overall health, consider adding some light exercise.".to_string(),
        },
        activity: ActivitySummary {
            distance_km: 4.18,
            active_minutes: 54,
            calories: 1200,
        },
        weight: WeightProgress {
            start_lbs: 200.0,
            current_lbs: 190.0,
            target_lbs: 180.0,
            weeks_left: 8,
        },
    }
}

pub fn workouts() -> WorkoutsOverview {
    WorkoutsOverview {
        plan: WorkoutPlan {
            name: "Full Body Strength".to_string(),
            days_per_week: 3,
            intensity: "Moderate".to_string(),
            completed: 1,
            remaining: 3,
            weeks_left: 2,
        },
        history: vec![
            WorkoutSession {
                date: "Mon, Oct 23".to_string(),
                title: "Upper Body".to_string(),
                minutes: 45,
            },
            WorkoutSession {
                date: "Sat, Oct 21".to_string(),
                title: "Cardio & Abs".to_string(),
                minutes: 30,
            },
        ],
    }
}
