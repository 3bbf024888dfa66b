use quick_xml::events::Event;
use quick_xml::Reader;
use svgcal::calendar::draw_onto;
use svgcal::config::Config;
use svgcal::options::Options;
use svgcal::svg::SvgDocument;

const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<svg xmlns="http://www.w3.org/2000/svg" width="297mm" height="210mm" viewBox="0 0 297 210" version="1.1">
  <g id="layer1">
    <rect id="background" x="0" y="0" width="297" height="210" style="fill:#fff"/>
  </g>
</svg>
"#;

fn render(config: &str) -> String {
    let config = Config::from_str(config).unwrap();
    let options = Options::from_config(&config).unwrap();
    let document = SvgDocument::parse(DOCUMENT.to_owned()).unwrap();

    String::from_utf8(draw_onto(&document, options, Vec::new()).unwrap()).unwrap()
}

/// Start tags with their `id` attribute, in document order.
fn elements(svg: &str) -> Vec<(String, Option<String>)> {
    let mut reader = Reader::from_str(svg);
    let mut found = Vec::new();

    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) => {
                let id = e
                    .try_get_attribute("id")
                    .unwrap()
                    .map(|a| a.unescape_value().unwrap().into_owned());
                found.push((String::from_utf8(e.name().as_ref().to_vec()).unwrap(), id));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    found
}

fn texts(svg: &str) -> Vec<String> {
    let mut reader = Reader::from_str(svg);
    let mut found = Vec::new();

    loop {
        match reader.read_event().unwrap() {
            Event::Text(t) => {
                let text = t.unescape().unwrap();
                if !text.trim().is_empty() {
                    found.push(text.into_owned());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    found
}

#[test]
fn whole_year_on_landscape_page() {
    let svg = render("year = 2024\nholidays = \"none\"\n");
    let elements = elements(&svg);

    // the existing content is kept and the calendar follows it
    assert_eq!(elements[0].0, "svg");
    assert_eq!(elements[1].1.as_deref(), Some("layer1"));
    assert_eq!(elements[2].1.as_deref(), Some("background"));
    assert_eq!(elements[3].1.as_deref(), Some("year_2024"));

    let months: Vec<&str> = elements
        .iter()
        .filter_map(|(_, id)| id.as_deref())
        .filter(|id| id.starts_with("month_"))
        .collect();
    assert_eq!(months.len(), 12);
    assert_eq!(months[11], "month_12_2024");

    // 12 months of 42 cells, 12 month names, 84 day names and the year
    let text_count = elements.iter().filter(|(tag, _)| tag == "text").count();
    assert_eq!(text_count, 12 * 42 + 12 + 12 * 7 + 1);

    assert!(svg.trim_end().ends_with("</g></svg>"));
}

#[test]
fn polish_february_with_frames_and_captions() {
    let svg = render(
        r#"
year = 2024
month = 2
start-day = "mon"
fill-empty-day-boxes = true
month-names = "Styczeń Luty Marzec Kwiecień Maj Czerwiec Lipiec Sierpień Wrzesień Październik Listopad Grudzień"
day-names = "Nd Pn Wt Śr Cz Pt So"
other-holidays = "02/14 Walentynki; 2024-02-29 Przestępny"

[frame]
enabled = true
"#,
    );
    let texts = texts(&svg);

    assert_eq!(texts[0], "2024");
    assert_eq!(texts[1], "Luty");
    assert_eq!(&texts[2..9], &["Pn", "Wt", "Śr", "Cz", "Pt", "So", "Nd"]);
    // January fillers come first
    assert_eq!(&texts[9..13], &["29", "30", "31", "1"]);
    assert!(texts.contains(&"Walentynki".to_owned()));
    assert!(texts.contains(&"Przestępny".to_owned()));

    let rects = elements(&svg)
        .into_iter()
        .filter(|(tag, _)| tag == "rect")
        .count();
    // one frame per day of February and the background
    assert_eq!(rects, 29 + 1);
}

#[test]
fn malformed_holidays_are_fatal() {
    let config = Config::from_str("year = 2024\nother-holidays = \"2024-13-45 Nope\"\n").unwrap();
    let err = Options::from_config(&config).unwrap_err();

    assert!(err.to_string().contains("2024-13-45"));
}
