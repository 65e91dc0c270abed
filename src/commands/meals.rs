use anyhow::Result;
use colored::Colorize;

use crate::cli::MealsCmd;
use crate::models::MealType;
use crate::state::AppState;
use crate::utils;

fn type_label(t: MealType) -> &'static str {
    match t {
        MealType::Breakfast => "breakfast",
        MealType::Lunch => "lunch",
        MealType::Dinner => "dinner",
        MealType::Snack => "snack",
    }
}

async fn set_eaten(state: &mut AppState, index: usize, eaten: bool) -> Result<()> {
    let meals = &state.meals().meals;
    let Some(i) = index.checked_sub(1).filter(|i| *i < meals.len()) else {
        println!(
            "{} no meal at index {} (today has {})",
            "error:".red().bold(),
            index,
            meals.len()
        );
        return Ok(());
    };

    let mut next = meals.clone();
    next[i].eaten = eaten;
    next[i].eaten_date = eaten.then(utils::today);
    let name = next[i].name.clone();

    state.save_meals(next).await?;

    let verb = if eaten { "eaten" } else { "not eaten" };
    println!("{} {} marked {}", "ok:".green().bold(), name.bold(), verb);
    Ok(())
}

pub async fn handle(cmd: MealsCmd, state: &mut AppState) -> Result<()> {
    match cmd {
        MealsCmd::Show => {
            let today = state.meals();
            println!("{} {}", "Meals for".cyan().bold(), today.date.to_string().bold());

            let mut eaten_cal = 0;
            let mut eaten_protein = 0;
            let mut total_cal = 0;
            let mut total_protein = 0;

            for (i, meal) in today.meals.iter().enumerate() {
                let marker = if meal.eaten { "✓".green() } else { "·".dimmed() };
                println!(
                    " {} {} {} {}",
                    format!("{}", i + 1).yellow(),
                    marker,
                    meal.name.bold(),
                    format!(
                        "({}, {} kcal, {} g protein)",
                        type_label(meal.meal_type),
                        meal.calories,
                        meal.protein
                    )
                    .dimmed()
                );

                total_cal += meal.calories;
                total_protein += meal.protein;
                if meal.eaten {
                    eaten_cal += meal.calories;
                    eaten_protein += meal.protein;
                }
            }

            println!(
                "\n{} {}/{} kcal, {}/{} g protein",
                "Today:".cyan().bold(),
                eaten_cal,
                total_cal,
                eaten_protein,
                total_protein
            );
        }

        MealsCmd::Eat { meal } => set_eaten(state, meal, true).await?,
        MealsCmd::Uneat { meal } => set_eaten(state, meal, false).await?,
    }

    Ok(())
}
