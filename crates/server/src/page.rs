use shared::domain::{CoffeeKind, OptionCommand};

/// Renders the machine page. The element ids are the page contract the
/// client scrapes and clicks: the hidden token input, `id_coffee_type`,
/// `coffee_maker`, `problems`, `coffee_image` and the `*_options`
/// recovery controls.
pub fn render_machine_page(csrf_token: &str) -> String {
    let mut coffee_options = String::new();
    for kind in CoffeeKind::ALL {
        coffee_options.push_str(&format!(
            "        <option value=\"{}\">{}</option>\n",
            kind.as_str(),
            kind.display_name()
        ));
    }

    let mut option_controls = String::new();
    for command in OptionCommand::ALL {
        option_controls.push_str(&format!(
            "      <button id=\"{id}\" type=\"button\" disabled>{id}</button>\n",
            id = command.identifier()
        ));
    }

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>Coffee machine</title></head>\n\
         <body>\n\
         <form method=\"post\">\n\
           <input type=\"hidden\" name=\"csrfmiddlewaretoken\" value=\"{csrf_token}\">\n\
           <select id=\"id_coffee_type\" name=\"coffee_type\">\n\
         {coffee_options}\
           </select>\n\
           <button id=\"coffee_maker\" type=\"button\">Make coffee</button>\n\
         {option_controls}\
         </form>\n\
         <div id=\"problems\"></div>\n\
         <div id=\"coffee_image\"></div>\n\
         </body>\n\
         </html>\n"
    )
}
