//! CB-005: Book pagination: cover, one page per time frame, closing page.
//!
//! A book is opened on a parsed recipe. Page 0 is the cover, pages
//! `1..=frames` are the time frames, and the last page says "Done!".
//! Turning pages saturates at both ends.

use super::palette::{self, Colour};
use super::scheduler;
use super::types::*;

/// What a single page shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Page<'a> {
    Cover(&'a Recipe),
    Frame(&'a TimeFrame),
    Done,
}

/// An open recipe book.
#[derive(Debug, Clone)]
pub struct Book {
    recipe: Recipe,
    schedule: Schedule,
    colour: Colour,
    page: usize,
}

impl Book {
    /// Open a recipe on its cover, coloured by its shelf position.
    pub fn open(recipe: Recipe, index: usize) -> Self {
        let schedule = scheduler::schedule(&recipe);
        Self {
            recipe,
            schedule,
            colour: palette::get_colour(index),
            page: 0,
        }
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn frames(&self) -> &[TimeFrame] {
        &self.schedule.frames
    }

    pub fn diagnostics(&self) -> &[ScheduleDiagnostic] {
        &self.schedule.diagnostics
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    /// Cover + frames + closing page.
    pub fn page_count(&self) -> usize {
        self.schedule.frames.len() + 2
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    /// Jump to a page, clamped to the last page.
    pub fn turn_to(&mut self, page: usize) {
        self.page = page.min(self.page_count() - 1);
    }

    /// Turn one page forward. Returns false on the last page.
    pub fn forward(&mut self) -> bool {
        if self.page + 1 >= self.page_count() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Turn one page back. Returns false on the cover.
    pub fn back(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn page(&self, page: usize) -> Option<Page<'_>> {
        let frames = &self.schedule.frames;
        match page {
            0 => Some(Page::Cover(&self.recipe)),
            n if n <= frames.len() => Some(Page::Frame(&frames[n - 1])),
            n if n == frames.len() + 1 => Some(Page::Done),
            _ => None,
        }
    }

    /// Text of a page, `None` past the end.
    pub fn render_page(&self, page: usize) -> Option<String> {
        self.page(page).map(|p| match p {
            Page::Cover(recipe) => render_cover(recipe),
            Page::Frame(frame) => render_frame(frame),
            Page::Done => "Done!\n".to_string(),
        })
    }
}

/// Upper-case the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cover page: title block, materials, ingredients, seasonings.
pub fn render_cover(recipe: &Recipe) -> String {
    let info = &recipe.info;
    let mut lines = vec![
        info.name.clone(),
        info.description.clone(),
        format!("- {}", info.author),
    ];
    if let Some(ref image) = info.image {
        lines.push(format!("Image: {}", image));
    }

    if !recipe.materials.is_empty() {
        lines.push(String::new());
        lines.push("Materials:".to_string());
        lines.push(recipe.materials.join(", "));
    }

    lines.push(String::new());
    lines.push("Ingredients:".to_string());
    if recipe.ingredients.is_empty() {
        lines.push("  None".to_string());
    }
    for (ingredient, amount) in &recipe.ingredients {
        lines.push(format!("  {}: {}", ingredient, amount));
    }

    if !recipe.seasonings.is_empty() {
        lines.push(String::new());
        lines.push("Seasonings:".to_string());
        lines.push(recipe.seasonings.join(", "));
    }
    join_lines(&lines)
}

/// Frame page: one block per track entry.
pub fn render_frame(frame: &TimeFrame) -> String {
    let mut lines = Vec::new();
    for entry in frame {
        let track = capitalize(&entry.time_line);
        match &entry.step {
            None => lines.push(track),
            Some(step) => {
                lines.push(format!("{} - {}", track, capitalize(&step.text)));
                let uses: Vec<&str> = step
                    .from
                    .iter()
                    .flatten()
                    .chain(step.ingredients.iter().flatten())
                    .map(String::as_str)
                    .collect();
                if !uses.is_empty() {
                    lines.push(format!("  {}", uses.join(", ")));
                }
                if let Some(minutes) = step.minutes.filter(|m| *m > 0) {
                    lines.push(format!("  Takes {} minutes", minutes));
                }
            }
        }
        lines.push("-".repeat(40));
    }
    join_lines(&lines)
}

/// Newline-terminated lines.
fn join_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{}\n", line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse_recipe;

    const PIE: &str = r#"
info:
  name: Apple pie
  description: A classic
  author: Ada
  image: https://example.com/pie.jpg
materials: [oven, rolling pin]
ingredients:
  flour: 250
  butter: 125.5
  apples: a few
seasonings: [cinnamon]
steps:
  dough:
    - text: knead the dough
      ingredients: [flour, butter]
      minutes: 10
    - goto: assemble
  filling:
    - text: slice apples
      ingredients: [apples]
    - goto: assemble
  assemble:
    - text: fill the crust
      from: [dough, filling]
    - text: bake
      minutes: 40
"#;

    fn pie() -> Book {
        Book::open(parse_recipe(PIE).unwrap(), 3)
    }

    #[test]
    fn test_cb005_page_count() {
        let book = pie();
        assert_eq!(book.frames().len(), 4);
        assert_eq!(book.page_count(), 6);
        assert!(book.diagnostics().is_empty());
        assert_eq!(book.colour(), palette::get_colour(3));
    }

    #[test]
    fn test_cb005_page_kinds() {
        let book = pie();
        assert!(matches!(book.page(0), Some(Page::Cover(_))));
        assert!(matches!(book.page(1), Some(Page::Frame(_))));
        assert!(matches!(book.page(5), Some(Page::Done)));
        assert!(book.page(6).is_none());
        assert!(book.render_page(6).is_none());
    }

    #[test]
    fn test_cb005_turning_saturates() {
        let mut book = pie();
        assert!(!book.back());
        assert_eq!(book.current_page(), 0);
        for _ in 0..5 {
            assert!(book.forward());
        }
        assert_eq!(book.current_page(), 5);
        assert!(!book.forward());
        assert!(book.back());
        assert_eq!(book.current_page(), 4);
        book.turn_to(99);
        assert_eq!(book.current_page(), 5);
    }

    #[test]
    fn test_cb005_empty_schedule_has_cover_and_done() {
        let book = Book::open(parse_recipe("info:\n  name: Air\nsteps: {}\n").unwrap(), 0);
        assert_eq!(book.page_count(), 2);
        assert_eq!(book.render_page(1).unwrap(), "Done!\n");
    }

    #[test]
    fn test_cb005_render_cover() {
        let text = pie().render_page(0).unwrap();
        assert!(text.starts_with("Apple pie\nA classic\n- Ada\n"));
        assert!(text.contains("Image: https://example.com/pie.jpg"));
        assert!(text.contains("Materials:\noven, rolling pin"));
        assert!(text.contains("  flour: 250\n"));
        assert!(text.contains("  butter: 125.5\n"));
        assert!(text.contains("  apples: a few\n"));
        assert!(text.contains("Seasonings:\ncinnamon"));
    }

    #[test]
    fn test_cb005_render_cover_empty_sections() {
        let recipe = parse_recipe("info:\n  name: Air\nsteps: {}\n").unwrap();
        let text = render_cover(&recipe);
        assert!(!text.contains("Materials:"));
        assert!(!text.contains("Seasonings:"));
        assert!(text.contains("Ingredients:\n  None"));
    }

    #[test]
    fn test_cb005_render_frames() {
        let book = pie();
        let first = book.render_page(1).unwrap();
        assert!(first.contains("Dough - Knead the dough\n  flour, butter\n  Takes 10 minutes"));
        assert!(!first.contains("Filling"));

        // Slicing apples is instantaneous, so it lands while the dough rests.
        let second = book.render_page(2).unwrap();
        assert!(second.starts_with("Dough\n"));
        assert!(second.contains("Filling - Slice apples\n  apples\n"));

        let merge = book.render_page(3).unwrap();
        assert!(merge.contains("Assemble - Fill the crust\n  dough, filling\n"));
        assert!(!merge.contains("Takes"));

        let last = book.render_page(4).unwrap();
        assert!(last.contains("Assemble - Bake\n  Takes 40 minutes"));
    }

    #[test]
    fn test_cb005_render_empty_frame() {
        assert_eq!(render_frame(&Vec::new()), "");
    }

    #[test]
    fn test_cb005_render_placeholder_block() {
        let frame = vec![TimeFrameStep {
            time_line: "dough".to_string(),
            step: None,
        }];
        assert_eq!(render_frame(&frame), format!("Dough\n{}\n", "-".repeat(40)));
    }

    #[test]
    fn test_cb005_capitalize() {
        assert_eq!(capitalize("dough"), "Dough");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize("Already"), "Already");
    }
}
