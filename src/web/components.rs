// ABOUTME: HTML components for the HTMX front end
// ABOUTME: Renders pages, recipe sections, forms, planner tables and error boxes as strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

//! HTML rendering
//!
//! Every user supplied value goes through `html_escape`: text content with
//! [`encode_text`] and attribute values with [`encode_double_quoted_attribute`].
//! Pages are built from the embedded `templates/page.html`.

use std::fmt::Write as _;

use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::errors::{AppError, ErrorCode};
use crate::models::{Recipe, RecipeSummary, Timings};

/// Layout shared by every page, embedded at compile time
const PAGE_TEMPLATE: &str = include_str!("../../templates/page.html");
const TIMINGS_SCRIPT: &str = include_str!("../../templates/timings.js");
const PLANNER_SCRIPT: &str = include_str!("../../templates/planner.js");

/// Navigation entries: label and path
pub const PAGES: [(&str, &str); 4] = [
    ("Recipes", "/"),
    ("New Recipe", "/new.html"),
    ("Timings", "/timings.html"),
    ("Planner", "/plan.html"),
];

const INPUT_CLASS: &str =
    "w-full p-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-green-500 focus:outline-none";
const PRIMARY_BUTTON_CLASS: &str =
    "px-4 py-1 bg-green-600 text-white rounded-lg font-medium hover:bg-green-700 transition";
const SECONDARY_BUTTON_CLASS: &str =
    "px-3 py-1 bg-green-100 text-green-700 rounded-lg hover:bg-green-200 transition";
const ERROR_BOX_CLASS: &str = "p-4 bg-red-50 border border-red-200 text-red-800 rounded-lg mb-4";
const SUCCESS_BOX_CLASS: &str =
    "p-4 bg-green-50 border border-green-200 text-green-800 rounded-lg mb-4";
const TABLE_CLASS: &str = "min-w-full bg-white border border-gray-300 rounded-lg shadow-sm";
const TH_CLASS: &str = "px-4 py-2 text-left text-gray-600";

// ============================================================================
// Layout
// ============================================================================

/// Wrap page content in the shared layout
#[must_use]
pub fn page(content: &str) -> String {
    let desktop: String = PAGES
        .iter()
        .map(|(name, href)| {
            format!(
                r#"<a href="{href}" class="text-green-700 hover:text-green-800 font-medium transition">{name}</a>"#
            )
        })
        .collect();
    let mobile: String = PAGES
        .iter()
        .map(|(name, href)| {
            format!(
                r#"<li><a href="{href}" class="block text-green-700 font-medium p-2 rounded-lg hover:bg-green-50 transition">{name}</a></li>"#
            )
        })
        .collect();

    PAGE_TEMPLATE
        .replace("{{NAV_DESKTOP}}", &desktop)
        .replace("{{NAV_MOBILE}}", &mobile)
        .replace("{{CONTENT}}", content)
}

/// Red message box
#[must_use]
pub fn error_box(message: &str) -> String {
    format!(
        r#"<div class="{ERROR_BOX_CLASS}">{}</div>"#,
        encode_text(message)
    )
}

/// Green message box
#[must_use]
pub fn success_box(message: &str) -> String {
    format!(
        r#"<div class="{SUCCESS_BOX_CLASS}">{}</div>"#,
        encode_text(message)
    )
}

// ============================================================================
// Recipes
// ============================================================================

fn recipe_body(recipe: &Recipe) -> String {
    let mut items = String::new();
    for ingredient in &recipe.ingredients {
        let _ = write!(
            items,
            "<li><div>{}</div></li>",
            encode_text(&ingredient.to_string())
        );
    }
    format!(
        r#"<h2 class="text-2xl font-bold text-green-700 mb-3">{name}</h2><ul class="list-disc ml-5 mb-4">{items}</ul><p style="white-space:pre-line;" class="pb-3">{instructions}</p>"#,
        name = encode_text(&recipe.name),
        instructions = encode_text(&recipe.instructions),
    )
}

/// Read-only recipe section, anchored by the recipe name
#[must_use]
pub fn recipe_section(recipe: &Recipe) -> String {
    format!(
        r#"<section class="bg-white rounded-2xl shadow-md p-6" id="{anchor}">{body}</section>"#,
        anchor = encode_double_quoted_attribute(&recipe.anchor()),
        body = recipe_body(recipe),
    )
}

/// Recipe section with an edit button that swaps itself for the edit form
#[must_use]
pub fn editable_recipe_section(recipe: &Recipe) -> String {
    format!(
        r#"<section class="bg-white rounded-2xl shadow-md p-6" id="{anchor}" hx-target="this" hx-swap="outerHTML">{body}<button hx-get="/recipe/{id}/edit" class="{PRIMARY_BUTTON_CLASS}">Edit</button></section>"#,
        anchor = encode_double_quoted_attribute(&recipe.anchor()),
        body = recipe_body(recipe),
        id = recipe.id,
    )
}

/// All recipes as editable sections
#[must_use]
pub fn recipes_main(recipes: &[Recipe]) -> String {
    let sections: String = recipes.iter().map(editable_recipe_section).collect();
    format!(r#"<main class="max-w-3xl mx-auto mt-10 p-4 space-y-12">{sections}</main>"#)
}

/// Contents list linking to each recipe anchor
#[must_use]
pub fn recipe_names(recipes: &[Recipe]) -> String {
    let mut links = String::new();
    for recipe in recipes {
        let _ = write!(
            links,
            r##"<li><a href="#{anchor}" class="block p-3 bg-white rounded-xl shadow-sm hover:bg-green-50 hover:text-green-700 transition">{name}</a></li>"##,
            anchor = encode_double_quoted_attribute(&recipe.anchor()),
            name = encode_text(&recipe.name),
        );
    }
    format!(
        r#"<section class="max-w-3xl mx-auto mt-6 p-4"><h2 class="text-xl font-semibold mb-3">Contents</h2><ul class="space-y-2">{links}</ul></section>"#
    )
}

fn name_input(current: &str) -> String {
    format!(
        r#"<div><label class="block font-semibold mb-1" for="name">Recipe Name</label><input id="name" name="name" type="text" required value="{}" class="{INPUT_CLASS}"></div>"#,
        encode_double_quoted_attribute(current)
    )
}

fn instructions_input(current: &str) -> String {
    format!(
        r#"<div><label class="block font-semibold mb-1" for="instructions">Instructions</label><textarea id="instructions" name="instructions" rows="6" required placeholder="Describe the preparation steps here..." class="{INPUT_CLASS}">{}</textarea></div>"#,
        encode_text(current)
    )
}

/// Alpine driven list of ingredient line inputs, posted as repeated `ingredients` fields
fn ingredient_inputs(lines: &[String]) -> String {
    let initial = if lines.is_empty() {
        vec![String::new()]
    } else {
        lines.to_vec()
    };
    let data = format!(
        "{{ ingredients: {} }}",
        serde_json::to_string(&initial).unwrap_or_else(|_| "['']".to_owned())
    );
    format!(
        r#"<div x-data="{data}"><label class="block font-semibold mb-1">Ingredients</label><template x-for="(ingredient, index) in ingredients" :key="index"><div class="flex items-center mb-2 space-x-2"><input type="text" name="ingredients" x-model="ingredients[index]" placeholder="Flour 2 cups" class="flex-1 p-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-green-500 focus:outline-none"><button type="button" @click="ingredients.splice(index, 1)" x-show="ingredients.length > 1" class="text-red-500 hover:text-red-700 font-bold text-xl">&times;</button></div></template><button type="button" @click="ingredients.push('')" class="mt-2 {SECONDARY_BUTTON_CLASS}">+ Add Ingredient</button></div>"#,
        data = encode_double_quoted_attribute(&data),
    )
}

/// Form replacing a recipe section while it is edited
#[must_use]
pub fn edit_recipe_form(recipe: &Recipe) -> String {
    format!(
        r#"<form hx-post="/update_recipe/{id}" hx-target="this" hx-swap="outerHTML" class="bg-white rounded-2xl shadow-md p-6 space-y-4">{name}{ingredients}{instructions}<button type="submit" class="{PRIMARY_BUTTON_CLASS}">Submit</button> <button type="button" hx-get="/recipe/{id}" class="{PRIMARY_BUTTON_CLASS}">Cancel</button></form>"#,
        id = recipe.id,
        name = name_input(&recipe.name),
        ingredients = ingredient_inputs(&recipe.ingredient_lines()),
        instructions = instructions_input(&recipe.instructions),
    )
}

/// Body of the new recipe page
#[must_use]
pub fn new_recipe_content() -> String {
    format!(
        r##"<main class="max-w-3xl mx-auto p-6 mt-8 bg-white shadow-md rounded-2xl"><h1 class="text-2xl font-bold text-green-700 mb-6">Create a New Recipe</h1><form hx-post="/new_recipe" hx-target="#form-result" hx-swap="innerHTML" class="space-y-6">{name}{ingredients}{instructions}<div class="text-right"><button type="submit" class="px-6 py-3 bg-green-600 text-white rounded-lg font-medium hover:bg-green-700 transition">Save Recipe</button></div></form><div id="form-result" class="mt-6"></div></main>"##,
        name = name_input(""),
        ingredients = ingredient_inputs(&[]),
        instructions = instructions_input(""),
    )
}

/// Body of the index page: contents and recipes load lazily
#[must_use]
pub fn index_content() -> String {
    r#"<div><div hx-get="/recipe_list" hx-trigger="load" hx-swap="outerHTML"></div><div hx-get="/recipes" hx-trigger="load" hx-swap="outerHTML"></div></div>"#
        .to_owned()
}

/// Error box for a failed recipe creation
///
/// Malformed ingredients are listed one per line under a heading; conflicts
/// and other validation failures show their message.
#[must_use]
pub fn new_recipe_error(error: &AppError) -> String {
    let body = match error.code {
        ErrorCode::InvalidFormat => {
            let mut lines = String::from("❌ Error(s) adding recipe<br>");
            for line in error.message.lines() {
                let _ = write!(lines, "<p>{}</p>", encode_text(line));
            }
            lines
        }
        ErrorCode::ResourceAlreadyExists | ErrorCode::InvalidInput => {
            encode_text(&error.message).into_owned()
        }
        _ => "Unexpected error adding a recipe".to_owned(),
    };
    format!(r#"<div class="p-4 bg-red-50 border border-red-200 text-red-800 rounded-lg">{body}</div>"#)
}

/// Error box for a failed recipe update
#[must_use]
pub fn update_recipe_error(error: &AppError) -> String {
    error_box(&format!("Error updating recipe: {}", error.message))
}

// ============================================================================
// Timings
// ============================================================================

/// Body of the timings page: the editor loads lazily
#[must_use]
pub fn timings_content() -> String {
    r##"<main class="max-w-3xl mx-auto p-6 mt-8 bg-white shadow-md rounded-2xl"><h1 class="text-2xl font-bold text-green-700 mb-6">Timing Plan</h1><div id="timing-container" hx-get="/timings" hx-trigger="load" hx-target="#timing-container" hx-swap="innerHTML"><div class="text-gray-400 italic">Loading timing data...</div></div></main>"##
        .to_owned()
}

fn add_step_button(position: &str) -> String {
    format!(
        r#"<div class="mt-4"><button type="button" @click="add{position}Step()" class="px-3 py-2 bg-green-100 text-green-700 rounded-lg hover:bg-green-200 transition">+ Add Step</button></div>"#
    )
}

/// Alpine timing editor seeded with the stored or default schedule
#[must_use]
pub fn timings_editor(timings: &Timings) -> String {
    let initial = serde_json::to_string(timings).unwrap_or_else(|_| "{}".to_owned());
    let x_data = format!("timingApp({initial})");
    let finish = timings.finish_time.format("%H:%M");
    let steps = r#"<div class="space-y-3"><template x-for="(step, index) in steps" :key="index"><div class="flex flex-row items-center space-x-3 bg-gray-50 p-3 rounded-lg border border-gray-200"><input type="text" x-model="step.step" placeholder="Step Description" class="w-full p-2 border border-gray-300 rounded-lg focus:ring-2 focus:ring-green-500 focus:outline-none sm:mb-0"><input type="number" x-model.number="step.offset" class="w-20 p-2 border border-gray-300 rounded-lg focus:ring-2 focus:ring-green-500 focus:outline-none text-right"><div class="text-lg text-gray-700 font-medium sm:w-28 text-center sm:mt-0"><template x-if="finishTime"><span x-text="calculateTimeString(step.offset)"></span></template></div><button type="button" @click="removeStep(index)" x-show="steps.length > 1" class="text-red-500 hover:text-red-700 ml-2 font-bold text-lg">x</button></div></template></div>"#;
    let save = r##"<div class="mt-6 text-right"><button type="button" hx-patch="/timings" hx-vals="js:{finish_time: Alpine.store('finishTime'), steps: JSON.stringify(Alpine.store('steps'))}" hx-target="#form-result" hx-swap="innerHTML" class="px-6 py-3 bg-green-600 text-white rounded-lg font-medium hover:bg-green-700 transition">Save Timing</button></div>"##;

    format!(
        r#"<div x-data="{x_data}" x-init="init()"><div class="mb-6"><label class="block font-semibold mb-1">Target Finish Time</label><input type="time" x-model="finishTime" @input="recalculate()" value="{finish}"></div>{above}{steps}{below}{save}<div id="form-result" class="mt-6"></div><script>{TIMINGS_SCRIPT}</script></div>"#,
        x_data = encode_double_quoted_attribute(&x_data),
        above = add_step_button("Above"),
        below = add_step_button("Below"),
    )
}

// ============================================================================
// Planner
// ============================================================================

/// Body of the planner page: week and summary load lazily
#[must_use]
pub fn planner_content() -> String {
    format!(
        r#"<div><main class="max-w-3xl mx-auto p-6 mt-8 bg-white shadow-md rounded-2xl"><h1 class="text-2xl font-bold text-green-700 mb-6">Weekly Meal Plan</h1><div hx-get="/weeks_plan" hx-trigger="load" hx-swap="outerHTML"></div><div hx-get="/summary" hx-trigger="load" hx-swap="outerHTML"></div></main><script>{PLANNER_SCRIPT}</script></div>"#
    )
}

/// Week table: one row per day with a meal input, suggestions and an update button
#[must_use]
pub fn planned_week(days: &[(NaiveDate, Option<String>)]) -> String {
    let mut rows = String::new();
    for (i, (day, meal)) in days.iter().enumerate() {
        let _ = write!(
            rows,
            r##"<tr class="hover:bg-gray-50"><td class="px-4 py-3">{weekday}<input type="hidden" name="day" value="{date}"></td><td class="px-4 py-3"><div class="flex items-center space-x-2"><input list="meal-list-{i}" name="meal" value="{meal}" hx-get="/meals" hx-target="#meal-list-{i}" hx-trigger="keyup[checkUserKeydown.call(this, event)] changed delay:25ms" class="flex-grow p-2 border border-gray-300 rounded-lg focus:ring-2 focus:ring-green-500 focus:outline-none"><datalist id="meal-list-{i}"></datalist><button type="submit" hx-post="/planned_day" hx-swap="none" hx-include="closest tr" class="{SECONDARY_BUTTON_CLASS}">Update</button></div></td></tr>"##,
            weekday = day.format("%A"),
            date = day.format("%Y-%m-%d"),
            meal = encode_double_quoted_attribute(meal.as_deref().unwrap_or_default()),
        );
    }
    format!(
        r#"<table class="{TABLE_CLASS}"><thead class="bg-gray-100"><tr><th class="{TH_CLASS}">Date</th><th class="{TH_CLASS}">Meal</th></tr></thead><tbody class="divide-y divide-gray-200">{rows}</tbody></table>"#
    )
}

/// Datalist options for meal name suggestions
#[must_use]
pub fn meal_options(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!(r#"<option value="{}"></option>"#, encode_double_quoted_attribute(name)))
        .collect()
}

/// Summary table of how often and how recently each recipe was planned
#[must_use]
pub fn summary_table(summaries: &[RecipeSummary]) -> String {
    let mut rows = String::new();
    for summary in summaries {
        let last_eaten = summary
            .last_eaten
            .map_or_else(|| "Never".to_owned(), |day| day.format("%Y-%m-%d").to_string());
        let _ = write!(
            rows,
            r#"<tr class="hover:bg-gray-50"><td class="px-4 py-3">{name}</td><td class="px-4 py-3">{count}</td><td class="px-4 py-3">{last_eaten}</td></tr>"#,
            name = encode_text(&summary.name),
            count = summary.count,
        );
    }
    format!(
        r##"<section id="recipe-summary" class="max-w-3xl mx-auto mt-6 p-4"><div class="flex justify-between"><h2 class="text-xl font-semibold text-gray-800 mb-4">Recipe Summary</h2><button type="submit" hx-get="/summary" hx-swap="outerHTML" hx-target="#recipe-summary" class="mb-1 {SECONDARY_BUTTON_CLASS}">Refresh</button></div><table class="{TABLE_CLASS}"><thead class="bg-gray-100"><tr><th class="{TH_CLASS}">Recipe</th><th class="{TH_CLASS}">Count</th><th class="{TH_CLASS}">Last Eaten</th></tr></thead><tbody class="divide-y divide-gray-200">{rows}</tbody></table></section>"##
    )
}
