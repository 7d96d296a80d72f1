//! Common shader sources for tests.

pub const EMPTY_MAIN: &str = "void main() {}";

pub const SINGLE_DECLARATION: &str = "int x = 1 + 2;";

pub const VERTEX_SHADER: &str = r#"
attribute vec3 position;
attribute vec2 texCoord;
uniform mat4 modelViewProjection;
varying vec2 uv;

void main() {
    uv = texCoord;
    gl_Position = modelViewProjection * vec4(position, 1.0);
}
"#;

pub const PREPROCESSOR_DIRECTIVE: &str = "#version 130\nvoid main() {}";

pub const CONDITIONAL_SHADER: &str = r#"#version 330 core
#extension GL_ARB_explicit_attrib_location : require
#define LIGHTS 4
#define USE_FOG

uniform vec3 positions[LIGHTS];

#ifdef USE_FOG
uniform float fogDensity;
#endif
#ifndef USE_FOG
uniform float unused;
#endif

#if defined(USE_SHADOWS) || LIGHTS > 8
uniform sampler2D shadowMap;
#elif LIGHTS == 4
uniform vec4 quad;
#else
uniform float single;
#endif

#undef USE_FOG
#ifdef USE_FOG
int broken = ;
#endif

void main() {}
"#;

pub const LIGHTING_SHADER: &str = r#"
precision mediump float;

struct Light {
    vec3 position;
    vec3 color;
    float intensity;
};

uniform Light lights[4];
uniform int lightCount;
uniform sampler2D diffuseMap; //$ @name = "Diffuse", @slot = 0

in vec3 normal;
in vec3 worldPos;
in vec2 uv;
out vec4 fragColor;

vec3 shade(in Light light, const vec3 n) {
    vec3 toLight = normalize(light.position - worldPos);
    float lambert = max(dot(n, toLight), 0.0);
    return light.color * lambert * light.intensity;
}

void main() {
    vec3 n = normalize(normal);
    vec3 total = vec3(0.0);
    for (int i = 0; i < lightCount; ++i) {
        total += shade(lights[i], n);
    }
    switch (lightCount) {
        case 0:
            total = vec3(0.1);
            break;
        default:
            break;
    }
    vec4 base = texture(diffuseMap, uv);
    fragColor = vec4(base.rgb * total, base.a);
    if (fragColor.a < 0.01)
        discard;
}
"#;

pub const LOOPS: &str = r#"
void main() {
    int i = 0;
    while (i < 10) i++;
    do { i -= 2; } while (i > 0);
    while (bool done = i == 0) { break; }
    for (;;) { continue; }
}
"#;
