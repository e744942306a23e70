// ABOUTME: Lesson scripts for the lesson-slides application
// ABOUTME: Declares the slide sequence of each weekly lesson independent of the HTTP layer

use crate::assets::AssetSource;
use crate::errors::{DeckError, Result};
use crate::slide::{CodeOptions, HighlightSet, Slide};
use log::debug;

/// Builds the slides of a lesson for one attendee.
pub type Script = fn(&str, &mut dyn AssetSource) -> Result<Vec<Slide>>;

/// A fixed sequence of slides taught in one week.
pub struct Lesson {
    pub week: u32,
    pub title: &'static str,
    script: Script,
}

impl Lesson {
    /// Gather every snippet and image the lesson needs and return its slides.
    pub fn slides(&self, name: &str, assets: &mut dyn AssetSource) -> Result<Vec<Slide>> {
        let slides = (self.script)(name, assets)?;
        debug!("Week {} lesson has {} slides", self.week, slides.len());
        Ok(slides)
    }
}

impl std::fmt::Debug for Lesson {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lesson")
            .field("week", &self.week)
            .field("title", &self.title)
            .finish()
    }
}

pub static LESSONS: &[Lesson] = &[
    Lesson {
        week: 1,
        title: "Node.js: JavaScript on the Server",
        script: week_one,
    },
    Lesson {
        week: 2,
        title: "Files and Asynchronous Code",
        script: week_two,
    },
    Lesson {
        week: 3,
        title: "Routes, Templates and APIs",
        script: week_three,
    },
];

/// The lesson taught in `week`.
pub fn find(week: u32) -> Result<&'static Lesson> {
    LESSONS
        .iter()
        .find(|lesson| lesson.week == week)
        .ok_or(DeckError::UnknownLesson(week))
}

fn step(lines: &[usize], comment: &str) -> CodeOptions {
    CodeOptions::default()
        .highlight(HighlightSet::from(lines))
        .comment(comment)
}

/// The code shown once as a whole, then once per highlighted step.
fn walkthrough(title: &str, code: &str, steps: Vec<CodeOptions>) -> Vec<Slide> {
    std::iter::once(Slide::code(title, code))
        .chain(
            steps
                .into_iter()
                .map(|options| Slide::code_with(title, code, options)),
        )
        .collect()
}

fn week_one(name: &str, assets: &mut dyn AssetSource) -> Result<Vec<Slide>> {
    const BASIC_SERVER: &str = "Basic server using Node.js / Express";
    const HTML_SERVER: &str = "Express server returning HTML";
    const JSON_SERVER: &str = "Express server returning JSON";
    const PDF_SERVER: &str = "Express server returning PDF";

    let hello_world = assets.snippet("hello-world.js")?;
    let generate_html = assets.snippet("generate-html.js")?;
    let generate_json = assets.snippet("generate-json.js")?;
    let generate_pdf = assets.snippet("generate-pdf.js")?;

    let mut slides = vec![
        Slide::intro("Node.js", "JavaScript on the Server"),
        Slide::subtitled(
            format!("Hello {}!", name),
            "These slides are generated by Node.js.",
        ),
        Slide::title("What is a server?"),
        Slide::image(assets.image("datacenter.jpg")?, "© Google Inc."),
        Slide::icon("Express", "server"),
        Slide::bullets(
            "Express",
            [
                "Turns Node.js into a web server.",
                "Provides support for request and response.",
                "Can generate HTML, JSON, static files, ...",
            ],
        ),
    ];

    slides.extend(walkthrough(
        BASIC_SERVER,
        &hello_world,
        vec![
            step(
                &[1],
                "Import express.js from the node_modules folder. This assumes we used\n`npm install express` to install it as a dependency.",
            ),
            step(
                &[2],
                "Create an app object by calling express as a function. This creates our server.",
            ),
            step(
                &[3],
                "Each server listens on a specific port. Here we get the port from the environment variables, or use 3000 as the default.",
            ),
            step(
                &[5, 6, 7],
                "Listen to a GET request at the root. Whenever a user requests the home page, return \"Hello World!\". Note that this is not a HTML page.",
            ),
            step(
                &[9, 10, 11],
                "Start the server on the given port. Print out a message once the server has started.",
            ),
        ],
    ));

    slides.extend([
        Slide::subtitled(
            "Installing Node.js",
            "https://nodejs.org/en/download/package-manager/",
        ),
        Slide::code(
            "Installing Node.js",
            "curl -sL https://deb.nodesource.com/setup_13.x | sudo -E bash -\nsudo apt-get install -y nodejs",
        ),
        Slide::title("What can a server do?"),
        Slide::image(
            assets.image("screenshot-facebook.png")?,
            "Screenshot of the Facebook page.",
        ),
        Slide::image(
            assets.image("screenshot-flights.png")?,
            "Screenshot of the Jet Airways booking page.",
        ),
        Slide::image(
            assets.image("screenshot-instagram-app.jpg")?,
            "Screenshot of the Instagram app.",
        ),
        Slide::quote(
            "Web Server",
            "The primary function of a web server is to store, process and deliver web pages to clients.",
            "Wikipedia",
        ),
    ]);

    slides.extend(walkthrough(
        HTML_SERVER,
        &generate_html,
        vec![step(
            &[6, 7],
            "We read in a query parameter from the URL, then write out a string containing HTML code.",
        )],
    ));
    slides.push(Slide::image(
        assets.image("generate-html.png")?,
        "Our HTML generating Express app.",
    ));

    slides.extend(walkthrough(
        JSON_SERVER,
        &generate_json,
        vec![step(&[6, 7, 8], "We write out a JSON object using res.json.")],
    ));
    slides.push(Slide::image(
        assets.image("generate-json.png")?,
        "Postman, showing the result of our Express app.",
    ));

    slides.extend(walkthrough(
        PDF_SERVER,
        &generate_pdf,
        vec![
            step(
                &[2],
                "We need an extra dependency. We can install it using\n\"npm install pdfkit\".",
            ),
            step(
                &[8, 9, 10, 11],
                "We create a new PDFKit document, write out a string and send the document to the client.",
            ),
        ],
    ));
    slides.push(Slide::image(
        assets.image("generate-pdf.png")?,
        "Generating a PDF file from Express using PDFKit.",
    ));

    Ok(slides)
}

fn week_two(name: &str, assets: &mut dyn AssetSource) -> Result<Vec<Slide>> {
    let read_file = assets.snippet("read-file-simple.js")?;
    let callbacks = assets.snippet("callbacks.js")?;
    let callback_hell = assets.snippet("callback-hell.js")?;
    let promises = assets.snippet("promises.js")?;
    let async_await = assets.snippet("async-await.js")?;
    let quotes = assets.snippet("read-file-quotes.js")?;
    let encrypt = assets.snippet("encrypt.js")?;

    let mut slides = vec![
        Slide::intro("Files and Asynchronous Code", "Reading and writing files with Node.js"),
        Slide::subtitled(format!("Welcome back, {}!", name), "Week 2"),
        Slide::title("Reading files"),
    ];

    slides.extend(walkthrough(
        "Reading a file",
        &read_file,
        vec![
            step(&[1], "We use the promise-based version of the `fs` module."),
            step(
                &[3, 4, 5, 6],
                "`await` pauses the function until the whole file has been read.",
            ),
            step(&[8], "`process.argv[2]` holds the first command line argument."),
        ],
    ));

    slides.push(Slide::bullets(
        "Asynchronous code",
        [
            "Node.js never waits for slow operations.",
            "A callback runs once the work is done.",
            "Promises and async/await keep the code readable.",
        ],
    ));

    slides.extend(walkthrough(
        "Callbacks",
        &callbacks,
        vec![
            step(
                &[3],
                "`fs.readFile` takes a function that is called once the file has been read.",
            ),
            step(
                &[4, 5, 6, 7],
                "The first argument of the callback is always the error, if any.",
            ),
        ],
    ));

    slides.extend(walkthrough(
        "Callback hell",
        &callback_hell,
        vec![step(
            &[4, 6, 8],
            "Every step that depends on the previous one nests one level deeper.",
        )],
    ));
    slides.push(Slide::text(
        "Callback hell",
        "Code that grows sideways faster than it grows down.",
    ));

    slides.extend(walkthrough(
        "Promises",
        &promises,
        vec![
            step(&[5, 6, 7], "`then` runs once the promise has resolved."),
            step(&[9, 11], "`catch` handles the error of each step."),
        ],
    ));

    slides.extend(walkthrough(
        "Async / await",
        &async_await,
        vec![
            step(&[3], "Mark the function as `async` to use `await` inside it."),
            step(
                &[5, 6],
                "Each `await` reads like a normal statement, but does not block the server.",
            ),
        ],
    ));

    slides.push(Slide::title("Exercises"));

    slides.extend(walkthrough(
        "A random quote",
        &quotes,
        vec![
            step(
                &[10],
                "`path.join` builds a path that works on every operating system.",
            ),
            step(&[12, 13], "Trim the text, then split it into lines."),
            step(&[14], "Pick one line at random and print it."),
        ],
    ));

    slides.extend(walkthrough(
        "Secret messages",
        &encrypt,
        vec![step(
            &[7, 8, 9, 10, 11, 12, 13, 14],
            "Shift every letter 13 places, wrapping around after Z.",
        )],
    ));

    Ok(slides)
}

fn week_three(name: &str, assets: &mut dyn AssetSource) -> Result<Vec<Slide>> {
    let routes = assets.snippet("routes-basic.js")?;
    let pizza = assets.snippet("routes-pizza.js")?;
    let static_files = assets.snippet("static-files.js")?;
    let templates = assets.snippet("templates.js")?;
    let github = assets.snippet("request-github.js")?;
    let bugs = [
        assets.snippet("bugs-body-body-1.js")?,
        assets.snippet("bugs-body-body-2.js")?,
        assets.snippet("bugs-body-body-3.js")?,
        assets.snippet("bugs-body-body-4.js")?,
    ];

    let mut slides = vec![
        Slide::intro("Routes, Templates and APIs", "Building real web applications"),
        Slide::subtitled(format!("Hi {}!", name), "Week 3"),
        Slide::title("Routes"),
    ];

    slides.extend(walkthrough(
        "Routes",
        &routes,
        vec![
            step(
                &[5, 6, 7],
                "Each route handles one path. `/users` returns a list of users.",
            ),
            step(&[9, 10, 11], "A second route answers requests for `/projects`."),
        ],
    ));

    slides.extend(walkthrough(
        "Route parameters",
        &pizza,
        vec![
            step(
                &[10],
                "`:kind` matches any value. Express stores it in `req.params.kind`.",
            ),
            step(&[12], "Always handle values you don't know about."),
        ],
    ));

    slides.extend(walkthrough(
        "Static files",
        &static_files,
        vec![step(
            &[4],
            "Every file in the `images` folder is served under `/static`.",
        )],
    ));

    slides.push(Slide::title("Templates"));
    slides.extend(walkthrough(
        "Templates",
        &templates,
        vec![
            step(
                &[3, 4, 5, 6, 7, 8, 9, 10],
                "A template mixes HTML with placeholders between `{{` and `}}`.",
            ),
            step(&[18, 19], "Compile the template once, then call it with data."),
        ],
    ));

    slides.push(Slide::bullets(
        "APIs",
        [
            "Other servers expose their data as JSON.",
            "Our server can call them like a browser would.",
            "Some APIs need a key or a User-Agent header.",
        ],
    ));
    slides.extend(walkthrough(
        "Calling an API",
        &github,
        vec![
            step(
                &[8, 9, 10, 11, 12],
                "Describe the request: the URL, the headers and that we expect JSON back.",
            ),
            step(
                &[13, 14],
                "`await` the response, then use it like any other object.",
            ),
        ],
    ));

    slides.push(Slide::subtitled("Debugging", "Where did my body go?"));
    let [first, second, third, fourth] = bugs;
    slides.extend([
        Slide::code("Saving a page", first),
        Slide::code_with(
            "Saving a page",
            second,
            step(&[4], "Log the body to see what the client actually sent."),
        ),
        Slide::code_with(
            "Saving a page",
            third,
            step(&[4], "The body is an object, not a string. Which keys does it have?"),
        ),
        Slide::code_with(
            "Saving a page",
            fourth,
            step(&[3], "The text lives in `req.body.body`."),
        ),
        Slide::quote(
            "Debugging",
            "Everyone knows that debugging is twice as hard as writing a program in the first place.",
            "Brian Kernighan",
        ),
    ]);

    Ok(slides)
}
