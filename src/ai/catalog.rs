//! The fixed set of shortcode kinds the model is asked to choose from.
//!
//! Several kinds share the `fill-in-the-blanks` tag; they differ in the
//! inline gap syntax (`text`, `radio`, `select`, `short-text`).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcodeKind {
    pub name: &'static str,
    pub label: &'static str,
    pub use_for: &'static str,
    pub format: &'static str,
    pub example: &'static str,
    pub note: Option<&'static str>,
}

pub const CATALOG: &[ShortcodeKind] = &[
    ShortcodeKind {
        name: "drag-words",
        label: "Arrastrar palabras",
        use_for: "Ejercicios donde hay que completar frases arrastrando palabras a huecos",
        format: r#"[drag-words words="palabra1|palabra2|palabra3" sentence="Texto con [] para rellenar" markers="palabra_correcta1|palabra_correcta2"][/drag-words]"#,
        example: r#"[drag-words words="gato|perro|elefante|mono|rata" sentence="El [] es más grande que el [], pero el [] es el más [] pequeño." markers="elefante|perro|gato|mono"][/drag-words]"#,
        note: None,
    },
    ShortcodeKind {
        name: "multiple-choice",
        label: "Selección múltiple",
        use_for: "Preguntas con MÚLTIPLES respuestas correctas posibles",
        format: r#"[multiple-choice options="opción1|opción2|opción3" correctOptions="opciónCorrecta1|opciónCorrecta2"][/multiple-choice]"#,
        example: r#"[multiple-choice options="Lechuga|Manzana|Zanahoria|Plátano|Pera" correctOptions="Manzana|Plátano|Pera"][/multiple-choice]"#,
        note: None,
    },
    ShortcodeKind {
        name: "single-choice",
        label: "Selección única",
        use_for: "Preguntas con UNA SOLA respuesta correcta",
        format: r#"[single-choice options="opción1|opción2|opción3" correctOption="opciónCorrecta"][/single-choice]"#,
        example: r#"[single-choice options="Rojo|Verde|Azul|Amarillo" correctOption="Azul"][/single-choice]"#,
        note: None,
    },
    ShortcodeKind {
        name: "fill-in-the-blanks",
        label: "Texto con espacios para rellenar (texto libre)",
        use_for: "Textos con espacios para rellenar (texto libre)",
        format: r#"[fill-in-the-blanks text="Texto con [text|respuesta] para completar." casesensitive="false" specialcharssensitive="false"][/fill-in-the-blanks]"#,
        example: r#"[fill-in-the-blanks text="La capital de [text|España] es Madrid." casesensitive="false" specialcharssensitive="false"][/fill-in-the-blanks]"#,
        note: None,
    },
    ShortcodeKind {
        name: "fill-in-the-blanks",
        label: "Elegir entre dos opciones",
        use_for: "Elegir entre dos opciones",
        format: r#"[fill-in-the-blanks text="Texto: [radio|Verdadero#Falso*]" casesensitive="false" specialcharssensitive="false"][/fill-in-the-blanks]"#,
        example: r#"[fill-in-the-blanks text="La leche es: [radio|Blanca*#Negra]" casesensitive="false" specialcharssensitive="false"][/fill-in-the-blanks]"#,
        note: Some("El asterisco (*) indica la opción correcta. El símbolo | separa las opciones."),
    },
    ShortcodeKind {
        name: "fill-in-the-blanks",
        label: "Textos con espacios para seleccionar entre opciones (menú desplegable)",
        use_for: "Textos con espacios para seleccionar entre opciones (menú desplegable)",
        format: r#"[fill-in-the-blanks text="Texto con [select|Incorrecta1#*Correcta#Incorrecta2] para seleccionar." casesensitive="false" specialcharssensitive="false"][/fill-in-the-blanks]"#,
        example: r#"[fill-in-the-blanks text="El animal más rápido es el [select|leopardo#*guepardo#león#tigre]." casesensitive="false" specialcharssensitive="false"][/fill-in-the-blanks]"#,
        note: Some("El asterisco (*) indica la opción correcta. Debe haber solo una opción correcta por cada hueco. El símbolo # separa las opciones."),
    },
    ShortcodeKind {
        name: "fill-in-the-blanks",
        label: "Letras para completar una única palabra",
        use_for: "Introducir letras para completar una única palabra",
        format: r#"[fill-in-the-blanks text="Texto [short-text|letra1][short-text|letra2][short-text|letra3]" casesensitive="false" specialcharssensitive="false"][/fill-in-the-blanks]"#,
        example: r#"[fill-in-the-blanks text="El caballo [text|blanco] de Santiago es de [short-text|c][short-text|o][short-text|l][short-text|o][short-text|r] blanco." casesensitive="false" specialcharssensitive="false"][/fill-in-the-blanks]"#,
        note: None,
    },
    ShortcodeKind {
        name: "statement-option-match",
        label: "Empareja opciones",
        use_for: "Emparejar conceptos o frases con sus correspondientes opciones",
        format: r#"[statement-option-match statements="a*afirmación1|b*afirmación2" options="a*título1*descripción1|b*título2*descripción2"][/statement-option-match]"#,
        example: r#"[statement-option-match statements="a*Lorem ipsum|b*Ipsum lorem|c*Dolor sit" options="a*Persona 1*Lorem ipsum Lorem ipsum|b*Persona 2*Lorem ipsum Lorem ipsum|c*Persona 3*Lorem ipsum Lorem ipsum"][/statement-option-match]"#,
        note: None,
    },
    ShortcodeKind {
        name: "writing",
        label: "Producción de texto",
        use_for: "Producción libre de texto escrito",
        format: r#"[writing maxtime="0"][/writing]"#,
        example: r#"[writing maxtime="0"][/writing]"#,
        note: None,
    },
    ShortcodeKind {
        name: "oral-expression",
        label: "Expresión oral",
        use_for: "Producción oral de respuestas",
        format: r#"[oral-expression autoplay="false" maxtime="0" maxplays="0"][/oral-expression]"#,
        example: r#"[oral-expression autoplay="false" maxtime="0" maxplays="0"][/oral-expression]"#,
        note: None,
    },
    ShortcodeKind {
        name: "file-upload",
        label: "Subir archivo",
        use_for: "Subir archivos como respuesta",
        format: r#"[file-upload extensions="pdf|doc|docx"][/file-upload]"#,
        example: r#"[file-upload extensions="pdf|doc|docx"][/file-upload]"#,
        note: None,
    },
    ShortcodeKind {
        name: "image-choice",
        label: "Selección de imagen",
        use_for: "Preguntas con opciones de selección de imágenes",
        format: r#"[image-choice images="url_imagen1*texto_alternativo1|url_imagen2*texto_alternativo2" correctOptionIndex="índice_opción_correcta"][/image-choice]"#,
        example: r#"[image-choice images="https://url-a-imagen-de-gato.com/gato.jpg*texto alternativo gato|https://url-a-imagen-de-perro.com/perro.jpg*texto alternativo perro" correctOptionIndex="1"][/image-choice]"#,
        note: None,
    },
    ShortcodeKind {
        name: "multi-question",
        label: "Multipregunta",
        use_for: "Agrupar varias preguntas en un solo bloque",
        format: r#"[multi-question questions=""][/multi-question]"#,
        example: r#"[multi-question questions=""][/multi-question]"#,
        note: None,
    },
    ShortcodeKind {
        name: "abnone-choice",
        label: "Elige A o B o Ninguno",
        use_for: "Preguntas con opciones A, B, Ninguna de las anteriores",
        format: r#"[abnone-choice titlea="Título A" texta="Texto A" titleb="Título B" textb="Texto B" questions="a*Pregunta A|b*Pregunta B|c*Pregunta C"][/abnone-choice]"#,
        example: r#"[abnone-choice titlea="Lorem" texta="Lorem ipsum Lorem ipsum" titleb="Ipsum" textb="Lorem" questions="a*¿Lorem ipsum?|b*¿Ipsum lorem?|c*¿Dolor sit?"][/abnone-choice]"#,
        note: None,
    },
];

/// Distinct tag names in catalog order.
pub fn kind_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    for kind in CATALOG {
        if !names.contains(&kind.name) {
            names.push(kind.name);
        }
    }
    names
}
